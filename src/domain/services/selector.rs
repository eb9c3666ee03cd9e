#[cfg(test)]
#[path = "selector_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use serde_derive::Deserialize;

use crate::domain::models::InterviewAnalysis;
use crate::domain::models::ReasonerBox;
use crate::domain::models::ReasonerPrompt;
use crate::infrastructure::stores::AnalysisStore;

use super::catalog;

const EXTRACT_CODING_CONTEXT: &str = "Please read the following article and extract the names or descriptions of the coding questions mentioned in it. Return the answer as a JSON array of strings.";

const EXTRACT_BEHAVIORAL_CONTEXT: &str = "Please read the following article and extract the behavioral questions mentioned in it. Behavioral questions typically focus on past experiences, how individuals handled specific situations, their skills, and personal attributes. They often start with phrases like \"Tell me about a time when...\", \"Describe a situation where...\", \"How do you handle...\", etc. If the article explicitly contains interview questions that fit the definition of behavioral questions, please prioritize extracting those directly. If the article does not contain explicit behavioral interview questions, or contains very few, please analyze the content of the article and generate a list of relevant behavioral questions that an interviewer might ask based on that content. Aim to generate at least 3 relevant behavioral questions in such cases. Return the answer as a JSON array of strings.";

const MATCH_CONTEXT: &str = "Please read the following article and identify the coding questions mentioned in it. Then, compare these questions to the following list of questions and their corresponding object IDs (as a JSON array). Identify the most similar question from the list to the questions found in the article. Return a JSON object containing the object ID of this most similar question, for example: {\"id\": \"680294d88e98930b17e3c6d7\"}";

#[derive(Deserialize)]
struct SimilarProblem {
    id: String,
}

/// Models wrap JSON replies in markdown fences more often than not.
fn strip_code_fences(raw: &str) -> String {
    return raw.replace("```json", "").replace("```", "").trim().to_string();
}

fn parse_string_list(raw: &str) -> Vec<String> {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<Vec<String>>(&cleaned) {
        Ok(list) => return list,
        Err(err) => {
            tracing::warn!(error = ?err, raw = raw, "Model reply was not a JSON list of strings");
            return vec![];
        }
    }
}

/// Article analysis: pull candidate questions out of a free-text interview
/// experience article and let the reasoning service pick the closest catalog
/// problem. The match is a best-effort hint; every path that cannot produce
/// one lands on the fixed fallback problem.
pub struct Selector {
    reasoner: ReasonerBox,
    analyses: Arc<AnalysisStore>,
}

impl Selector {
    pub fn new(reasoner: ReasonerBox, analyses: Arc<AnalysisStore>) -> Selector {
        return Selector { reasoner, analyses };
    }

    pub async fn extract_coding_questions(&self, article: &str) -> Result<Vec<String>> {
        let prompt = ReasonerPrompt::new(
            EXTRACT_CODING_CONTEXT,
            &format!("Article:\n{article}\n\nCoding Question Names:"),
            "",
        );
        let raw = self.reasoner.complete(prompt).await?;

        return Ok(parse_string_list(&raw));
    }

    pub async fn extract_behavioral_questions(&self, article: &str) -> Result<Vec<String>> {
        let prompt = ReasonerPrompt::new(
            EXTRACT_BEHAVIORAL_CONTEXT,
            &format!("Article:\n{article}\n\nBehavioral Questions:"),
            "",
        );
        let raw = self.reasoner.complete(prompt).await?;

        return Ok(parse_string_list(&raw));
    }

    /// Asks the reasoning service for the closest catalog entry. Only ids
    /// that exist in the catalog come back; anything else is `None`.
    pub async fn match_problem(&self, article: &str) -> Result<Option<String>> {
        let prompt = ReasonerPrompt::new(
            MATCH_CONTEXT,
            &format!(
                "Article:\n{article}\n\nQuestion List:\n{catalog}",
                catalog = catalog::serialized_for_matching()
            ),
            "",
        );
        let raw = self.reasoner.complete(prompt).await?;

        let cleaned = strip_code_fences(&raw);
        match serde_json::from_str::<SimilarProblem>(&cleaned) {
            Ok(similar) => {
                if catalog::find(&similar.id).is_some() {
                    return Ok(Some(similar.id));
                }
                tracing::warn!(id = similar.id, "Model picked an id outside the catalog");
                return Ok(None);
            }
            Err(err) => {
                tracing::warn!(error = ?err, raw = raw, "Model reply was not a similar-question object");
                return Ok(None);
            }
        }
    }

    pub async fn analyze(&self, article: &str) -> Result<InterviewAnalysis> {
        let candidates = match self.extract_coding_questions(article).await {
            Ok(candidates) => candidates,
            Err(err) => {
                tracing::error!(error = ?err, "Article analysis failed");
                let mut analysis = InterviewAnalysis::new(catalog::default_problem().clone());
                analysis.reasoning = "An error occurred during the analysis.".to_string();
                analysis.error = Some("An error occurred during the analysis.".to_string());
                self.capture(&analysis).await;
                return Ok(analysis);
            }
        };

        let behavioral_questions = match self.extract_behavioral_questions(article).await {
            Ok(questions) => questions,
            Err(err) => {
                tracing::warn!(error = ?err, "Behavioral question extraction failed");
                vec![]
            }
        };

        let mut analysis = InterviewAnalysis::new(catalog::default_problem().clone());
        analysis.behavioral_questions = behavioral_questions;

        if candidates.is_empty() {
            analysis.reasoning = "No coding questions were found in the article.".to_string();
            analysis.error = Some("No coding questions found in the article.".to_string());
            self.capture(&analysis).await;
            return Ok(analysis);
        }

        let matched = match self.match_problem(article).await {
            Ok(matched) => matched,
            Err(err) => {
                tracing::error!(error = ?err, "Problem matching failed");
                None
            }
        };

        match matched {
            Some(id) => {
                let problem = catalog::find(&id).unwrap().clone();
                analysis.problem_id = problem.id.to_string();
                analysis.problem = problem;
                analysis.reasoning = "The problem was selected based on its similarity to the extracted coding questions.".to_string();
                analysis.success = true;
            }
            None => {
                analysis.reasoning = "The default problem was selected as a fallback.".to_string();
                analysis.success = true;
                analysis.error = Some("Could not identify the most similar question.".to_string());
            }
        }

        self.capture(&analysis).await;
        return Ok(analysis);
    }

    async fn capture(&self, analysis: &InterviewAnalysis) {
        if let Err(err) = self.analyses.save(analysis).await {
            tracing::error!(error = ?err, "Failed to capture article analysis");
        }
    }
}
