// src/assess/mod.rs

pub mod aggregate;
pub mod score;
pub mod service;

use std::error::Error;

use crate::model::HeroProfile;

use service::AssessorReply;

/// Seam between the batch driver and whatever produces judgements.
/// A remote generative implementation may return either reply variant;
/// the local rule pipeline is always structured.
pub trait Assessor {
    fn assess(&self, profile: &HeroProfile) -> Result<AssessorReply, Box<dyn Error>>;
}

/// The local assessor: fixed polarity rule table plus aggregation.
pub struct RuleAssessor;

impl Assessor for RuleAssessor {
    fn assess(&self, profile: &HeroProfile) -> Result<AssessorReply, Box<dyn Error>> {
        Ok(AssessorReply::Parsed(aggregate::assess(profile)))
    }
}
