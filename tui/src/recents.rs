//! Recents tracking (§4's "Recents" pseudo-group): the N most recently
//! touched sessions, independent of workspace/worktree grouping, split into
//! "ready" (idle, awaiting attention) and "running" (active) buckets for the
//! sidebar's three synthetic rows.

use std::collections::VecDeque;

use fleet_protocol::SessionId;
use fleet_protocol::session::SessionStatus;

const MAX_RECENTS: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct Recents {
    order: VecDeque<SessionId>,
}

impl Recents {
    pub fn touch(&mut self, session_id: SessionId) {
        self.order.retain(|id| id != &session_id);
        self.order.push_front(session_id);
        while self.order.len() > MAX_RECENTS {
            self.order.pop_back();
        }
    }

    pub fn remove(&mut self, session_id: &SessionId) {
        self.order.retain(|id| id != session_id);
    }

    pub fn all(&self) -> impl Iterator<Item = &SessionId> {
        self.order.iter()
    }

    pub fn bucketed<'a>(
        &'a self,
        statuses: impl Fn(&SessionId) -> Option<SessionStatus> + 'a,
    ) -> (Vec<&'a SessionId>, Vec<&'a SessionId>) {
        let mut ready = Vec::new();
        let mut running = Vec::new();
        for id in &self.order {
            match statuses(id) {
                Some(SessionStatus::Active) => running.push(id),
                Some(SessionStatus::Idle) => ready.push(id),
                _ => {}
            }
        }
        (ready, running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_an_existing_entry_moves_it_to_front() {
        let mut recents = Recents::default();
        recents.touch(SessionId::new("a"));
        recents.touch(SessionId::new("b"));
        recents.touch(SessionId::new("a"));
        let order: Vec<_> = recents.all().cloned().collect();
        assert_eq!(order, vec![SessionId::new("a"), SessionId::new("b")]);
    }

    #[test]
    fn bucketed_splits_by_status_and_drops_exited() {
        let mut recents = Recents::default();
        recents.touch(SessionId::new("a"));
        recents.touch(SessionId::new("b"));
        recents.touch(SessionId::new("c"));
        let (ready, running) = recents.bucketed(|id| match id.as_str() {
            "a" => Some(SessionStatus::Idle),
            "b" => Some(SessionStatus::Active),
            _ => Some(SessionStatus::Exited),
        });
        assert_eq!(ready, vec![&SessionId::new("a")]);
        assert_eq!(running, vec![&SessionId::new("b")]);
    }
}
