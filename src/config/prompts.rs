//! Prompt templates for Viva.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub quiz: QuizPrompts,
    pub feedback: FeedbackPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for question generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizPrompts {
    pub system: String,
    pub user: String,
}

impl Default for QuizPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an expert tutor evaluating a student's understanding of a lecture's core concepts. Your task is to generate well-structured, thought-provoking questions that directly assess the student's grasp of the key principles, theories, mechanisms, or frameworks presented in the lecture.

Guidelines:
1. Only focus on the core subject matter. Strictly avoid questions about research papers, teaching methods, quizzes, grading, assignments, course logistics, or any other administrative aspects.
2. Ask questions that test conceptual understanding rather than simple recall:
   - Fundamental theories, models, or frameworks related to the lecture topic.
   - Key concepts and principles that drive understanding in the field.
   - Applications of these concepts in real-world or hypothetical scenarios.
   - Comparisons and contrasts between different theories, models, or approaches.
   - Implications or consequences of applying these concepts in practice.
3. Encourage higher-order thinking. Ask the student to explain, analyze, compare, apply, or evaluate ideas rather than memorize facts.
4. Ensure all questions are clear, precise, and directly relevant to the lecture's subject matter. Avoid vague or overly broad questions.
5. Do NOT reference timestamps, slides, visuals, images, tables, or external sources. The questions should be fully based on the lecture's spoken content.

Output format: a numbered list, one question per line, nothing else.
1. [First question]
2. [Second question]
..."#
                .to_string(),

            user: r#"Here is the transcript of a lecture:

{{transcript}}

Generate {{count}} challenging, insightful questions that assess the student's understanding of the core concepts covered in this lecture. Respond with the numbered list only."#
                .to_string(),
        }
    }
}

/// Prompts for answer grading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackPrompts {
    pub system: String,
    pub user: String,
}

impl Default for FeedbackPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an expert tutor assessing a student's answer to a conceptual question. Your goal is to provide detailed, constructive feedback that helps the student improve their understanding. Evaluate conceptual correctness, not verbatim matching.

Evaluation criteria:
1. Accuracy: Does the response correctly address the key concepts in the question? Are there any factual errors or misconceptions?
2. Depth of understanding: Does the answer demonstrate surface-level knowledge or a deep conceptual grasp of the topic?
3. Clarity and coherence: Is the response well-structured, easy to follow, and logically reasoned?
4. Critical thinking: Does the student analyze, apply, or evaluate ideas instead of just recalling facts?

Your response should include:
1. Overall assessment: a summary of how well the student answered the question.
2. Strengths: what the student did well (clear explanation, strong reasoning, good use of examples).
3. Areas for improvement: specific weaknesses (missing key details, logical gaps, lack of depth).
4. Suggested enhancements: actionable tips to refine the answer (rethinking assumptions, connecting ideas, providing more examples).

Write constructive prose. Do not assign a numeric score."#
                .to_string(),

            user: r#"{{#if context}}Reference material from the lecture:
{{context}}

{{/if}}Question: {{question}}

Student's answer: {{answer}}

Evaluate the student's answer following the guidelines."#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        // Store custom variables
        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            // Load quiz prompts if file exists
            let quiz_path = custom_path.join("quiz.toml");
            if quiz_path.exists() {
                let content = std::fs::read_to_string(&quiz_path)?;
                prompts.quiz = toml::from_str(&content)?;
            }

            // Load feedback prompts if file exists
            let feedback_path = custom_path.join("feedback.toml");
            if feedback_path.exists() {
                let content = std::fs::read_to_string(&feedback_path)?;
                prompts.feedback = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    ///
    /// Supports `{{var}}` substitution and a single optional
    /// `{{#if var}}...{{/if}}` block that is dropped when the variable
    /// is absent or empty.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();

        // Resolve conditional blocks first
        while let Some(start) = result.find("{{#if ") {
            let Some(cond_end) = result[start..].find("}}") else {
                break;
            };
            let cond_end = start + cond_end;
            let var_name = result[start + 6..cond_end].trim().to_string();

            let Some(block_end) = result[cond_end..].find("{{/if}}") else {
                break;
            };
            let block_end = cond_end + block_end;

            let body = result[cond_end + 2..block_end].to_string();
            let keep = vars.get(&var_name).is_some_and(|v| !v.is_empty());

            let replacement = if keep { body } else { String::new() };
            result.replace_range(start..block_end + 7, &replacement);
        }

        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        // Start with custom variables, then override with provided vars
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.quiz.system.is_empty());
        assert!(!prompts.feedback.system.is_empty());
        assert!(prompts.quiz.user.contains("{{transcript}}"));
        assert!(prompts.quiz.user.contains("{{count}}"));
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_render_conditional_present() {
        let template = "{{#if context}}Context: {{context}}\n{{/if}}Q: {{question}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert("context".to_string(), "inertia basics".to_string());
        vars.insert("question".to_string(), "What is inertia?".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Context: inertia basics\nQ: What is inertia?");
    }

    #[test]
    fn test_render_conditional_absent() {
        let template = "{{#if context}}Context: {{context}}\n{{/if}}Q: {{question}}";
        let mut vars = std::collections::HashMap::new();
        vars.insert("question".to_string(), "What is inertia?".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Q: What is inertia?");
    }
}
