//! Request-scoped context passed to every external collaborator.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Identifies a single invocation of the pipeline.
///
/// Every read from the input store and every platform write receives the
/// context of the invocation that triggered it, so log lines from sources,
/// the engine, and the platform client can be correlated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: Uuid,
    pub started_at: DateTime<Utc>,
    /// Who or what triggered the invocation (operator name, "scheduler", ...).
    pub actor: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::now_v7(),
            started_at: Utc::now(),
            actor: None,
        }
    }

    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// Short prefix used in log lines.
    pub fn tag(&self) -> String {
        let id = self.request_id.simple().to_string();
        format!("req:{}", &id[id.len() - 8..])
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_uses_request_id_suffix() {
        let ctx = RequestContext::new();
        let full = ctx.request_id.simple().to_string();
        assert_eq!(ctx.tag(), format!("req:{}", &full[24..]));
    }

    #[test]
    fn test_with_actor() {
        let ctx = RequestContext::new().with_actor("operator");
        assert_eq!(ctx.actor.as_deref(), Some("operator"));
    }
}
