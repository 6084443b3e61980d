//! Scope planning for annotated decisions
//!
//! | scope          | flavor | security | plan                              |
//! |----------------|--------|----------|-----------------------------------|
//! | alternate only | yes    | any      | render alternate variants         |
//! | alternate only | no     | any      | defer                             |
//! | full           | yes    | any      | render every variant              |
//! | full           | no     | yes      | render primary, expedited         |
//! | full           | no     | no       | per `MissingFlavorPolicy`         |

use crate::config::MissingFlavorPolicy;
use crate::domain::{DeferReason, ReleaseVersion, UpdateDecision, UpdateScope};

/// What to render for one major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub major: u64,
    pub target: ReleaseVersion,
    /// Families that move to `target`
    pub scope: UpdateScope,
    pub expedited: bool,
    /// Set when the alternate family is held back
    pub deferred: Option<DeferReason>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    Render(RenderPlan),
    Defer(DeferReason),
    /// The missing flavor must stop the whole run before any write
    Abort,
    /// Nothing to do
    Idle,
}

pub fn plan(decision: &UpdateDecision, policy: MissingFlavorPolicy, flavor: &str) -> PlanOutcome {
    let render = |scope: UpdateScope, expedited: bool, deferred: Option<DeferReason>| {
        PlanOutcome::Render(RenderPlan {
            major: decision.major,
            target: decision.target_version.clone(),
            scope,
            expedited,
            deferred,
        })
    };
    let missing = || DeferReason::MissingFlavor {
        flavor: flavor.to_string(),
    };

    match (decision.scope, decision.alternate_flavor_available) {
        (UpdateScope::None, _) => PlanOutcome::Idle,
        (scope, true) => render(scope, false, None),
        (UpdateScope::AlternateOnly, false) => match policy {
            MissingFlavorPolicy::Abort => PlanOutcome::Abort,
            _ => PlanOutcome::Defer(missing()),
        },
        (UpdateScope::PrimaryOnly, false) => render(UpdateScope::PrimaryOnly, false, Some(missing())),
        (UpdateScope::Full, false) if decision.is_security_release => {
            render(UpdateScope::PrimaryOnly, true, Some(missing()))
        }
        (UpdateScope::Full, false) => match policy {
            MissingFlavorPolicy::Narrow => render(UpdateScope::PrimaryOnly, false, Some(missing())),
            MissingFlavorPolicy::Skip => PlanOutcome::Defer(missing()),
            MissingFlavorPolicy::Abort => PlanOutcome::Abort,
        },
    }
}
