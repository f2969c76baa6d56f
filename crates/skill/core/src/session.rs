//! Apply/revert transactions over a graph.
//!
//! A session captures every node level and the unspent point count before
//! edits begin. `apply` commits the edits and re-captures; `revert` restores
//! the capture exactly. Only one session may be active at a time.

use crate::error::{CoreError, ErrorSeverity};
use crate::graph::{GraphId, SkillGraph};
use crate::progression::Progression;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionError {
    #[error("a session is already active on graph '{0}'")]
    SessionAlreadyActive(GraphId),

    #[error("snapshot belongs to graph '{expected}', not '{found}'")]
    GraphMismatch { expected: GraphId, found: GraphId },
}

impl CoreError for SessionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            SessionError::SessionAlreadyActive(_) => ErrorSeverity::Recoverable,
            SessionError::GraphMismatch { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SessionError::SessionAlreadyActive(_) => "SESSION_ALREADY_ACTIVE",
            SessionError::GraphMismatch { .. } => "SESSION_GRAPH_MISMATCH",
        }
    }
}

/// Immutable copy of per-node levels (slot order) and unspent points.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub graph_id: GraphId,
    pub levels: Vec<u32>,
    pub unspent_points: u32,
}

impl SessionSnapshot {
    pub fn capture(graph: &SkillGraph, progression: &Progression) -> Self {
        Self {
            graph_id: graph.id().clone(),
            levels: graph.levels(),
            unspent_points: progression.unspent_points,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SkillSession {
    baseline: Option<SessionSnapshot>,
    active: bool,
}

impl SkillSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn baseline(&self) -> Option<&SessionSnapshot> {
        self.baseline.as_ref()
    }

    /// Captures the current state and opens a session.
    pub fn begin(
        &mut self,
        graph: &SkillGraph,
        progression: &Progression,
    ) -> Result<(), SessionError> {
        if self.active {
            return Err(SessionError::SessionAlreadyActive(graph.id().clone()));
        }
        self.baseline = Some(SessionSnapshot::capture(graph, progression));
        self.active = true;
        tracing::debug!(
            "Session started on '{}' with {} unspent points",
            graph.id(),
            progression.unspent_points
        );
        Ok(())
    }

    /// Commits pending edits and re-captures the baseline.
    ///
    /// Returns whether a session was active.
    pub fn apply(&mut self, graph: &SkillGraph, progression: &Progression) -> bool {
        let was_active = self.active;
        self.reset_baseline(graph, progression);
        if was_active {
            tracing::debug!("Session applied on '{}'", graph.id());
        }
        was_active
    }

    /// Restores the baseline captured by `begin`.
    ///
    /// Returns `Ok(false)` and changes nothing when no session is active.
    pub fn revert(
        &mut self,
        graph: &mut SkillGraph,
        progression: &mut Progression,
    ) -> Result<bool, SessionError> {
        if !self.active {
            return Ok(false);
        }
        let Some(snapshot) = &self.baseline else {
            self.active = false;
            return Ok(false);
        };
        if snapshot.graph_id != *graph.id() || !graph.restore_levels(&snapshot.levels) {
            return Err(SessionError::GraphMismatch {
                expected: snapshot.graph_id.clone(),
                found: graph.id().clone(),
            });
        }

        progression.unspent_points = snapshot.unspent_points;
        self.active = false;
        tracing::debug!(
            "Session reverted on '{}' to {} unspent points",
            graph.id(),
            progression.unspent_points
        );
        Ok(true)
    }

    /// Adds points earned outside the session to the baseline, so a revert
    /// only undoes the edits made inside it.
    pub fn credit(&mut self, points: u32) {
        if !self.active {
            return;
        }
        if let Some(snapshot) = &mut self.baseline {
            snapshot.unspent_points = snapshot.unspent_points.saturating_add(points);
        }
    }

    /// Closes any active session and captures a fresh baseline.
    pub fn reset_baseline(&mut self, graph: &SkillGraph, progression: &Progression) {
        self.baseline = Some(SessionSnapshot::capture(graph, progression));
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphDefinition, SlotIndex};
    use crate::node::SkillDefinition;

    fn graph() -> SkillGraph {
        SkillGraph::from_definition(
            GraphDefinition::new("g", 2, 1)
                .with_node(SkillDefinition::new("a", SlotIndex(0), 3))
                .with_node(SkillDefinition::new("b", SlotIndex(1), 3)),
        )
        .unwrap()
    }

    #[test]
    fn second_begin_fails() {
        let graph = graph();
        let progression = Progression::new(1, 2);
        let mut session = SkillSession::new();

        session.begin(&graph, &progression).unwrap();
        assert_eq!(
            session.begin(&graph, &progression),
            Err(SessionError::SessionAlreadyActive("g".into()))
        );
    }

    #[test]
    fn revert_restores_levels_and_points() {
        let mut graph = graph();
        let mut progression = Progression::new(1, 4);
        let mut session = SkillSession::new();

        session.begin(&graph, &progression).unwrap();
        graph.upgrade("a", &mut progression).unwrap();
        graph.upgrade("b", &mut progression).unwrap();

        assert_eq!(session.revert(&mut graph, &mut progression), Ok(true));
        assert_eq!(graph.levels(), vec![0, 0]);
        assert_eq!(progression.unspent_points, 4);
        assert!(!session.is_active());
    }

    #[test]
    fn credit_survives_revert() {
        let mut graph = graph();
        let mut progression = Progression::new(1, 1);
        let mut session = SkillSession::new();

        session.credit(5);
        session.begin(&graph, &progression).unwrap();
        graph.upgrade("a", &mut progression).unwrap();
        progression.unspent_points += 2;
        session.credit(2);

        assert_eq!(session.revert(&mut graph, &mut progression), Ok(true));
        assert_eq!(graph.levels(), vec![0, 0]);
        assert_eq!(progression.unspent_points, 3);
    }

    #[test]
    fn revert_after_apply_is_noop() {
        let mut graph = graph();
        let mut progression = Progression::new(1, 4);
        let mut session = SkillSession::new();

        session.begin(&graph, &progression).unwrap();
        graph.upgrade("a", &mut progression).unwrap();
        assert!(session.apply(&graph, &progression));

        assert_eq!(session.revert(&mut graph, &mut progression), Ok(false));
        assert_eq!(graph.levels(), vec![1, 0]);
        assert_eq!(progression.unspent_points, 3);
        assert_eq!(session.baseline().map(|s| s.unspent_points), Some(3));
    }
}
