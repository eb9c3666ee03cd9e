pub mod gemini;
pub mod julep;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::ReasonerBox;

pub struct ReasonerManager {}

impl ReasonerManager {
    pub fn get(name: &str) -> Result<ReasonerBox> {
        if name == "gemini" {
            return Ok(Arc::<gemini::Gemini>::default());
        }

        if name == "julep" {
            return Ok(Arc::<julep::Julep>::default());
        }

        bail!(format!("No reasoner implemented for {name}"))
    }
}
