//! The Pre → Mid → Post pipeline (spec §4.1): Pre fully completes before Mid
//! starts, Mid fully completes before Post starts (spec §5 ordering
//! guarantee).

pub mod mid;
pub mod post;
pub mod pre;

use gateway_core::clients::policy::Validator;
use gateway_core::drive::{DrivePolicy, DriveVector};
use gateway_core::intent::{Family, IntentRecord};
use gateway_core::memory::{Episode, Trait};

/// Everything Pre produces and Mid/Post consume (spec §3 `PipelineContext`).
pub struct PipelineContext {
    pub lane: &'static str,
    pub intent: IntentRecord,
    pub system_addenda: Vec<String>,
    pub validators: Vec<Validator>,
    pub drive: DriveVector,
    pub drive_policy: Option<DrivePolicy>,
    pub traits: Vec<Trait>,
    pub episodes: Vec<Episode>,
}

/// Maps a content family to a Policy Guardrails lane (spec §4.5 names four
/// lanes; §4.2/§4.5 never state the mapping explicitly — decided here and
/// recorded in DESIGN.md).
pub fn lane_for_family(family: Family) -> &'static str {
    match family {
        Family::Psychotherapy => "emotional",
        Family::Tech => "technical",
        Family::Legal | Family::Regulated | Family::GeneralPrecision => "analytical",
        Family::OpenEnded => "creative",
    }
}
