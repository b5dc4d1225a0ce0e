//! Scoped notes (§3/§4's note modes). Notes are keyed by id but most lookups
//! are by scope, so this keeps a secondary index rather than scanning a flat
//! `Vec` on every render.

use std::collections::HashMap;

use fleet_protocol::Note;
use fleet_protocol::NoteId;
use fleet_protocol::NoteScope;

#[derive(Debug, Clone, Default)]
pub struct NoteStore {
    by_id: HashMap<NoteId, Note>,
}

impl NoteStore {
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.by_id = notes.into_iter().map(|n| (n.id.clone(), n)).collect();
    }

    pub fn upsert(&mut self, note: Note) {
        self.by_id.insert(note.id.clone(), note);
    }

    pub fn remove(&mut self, id: &NoteId) {
        self.by_id.remove(id);
    }

    pub fn for_scope(&self, scope: &NoteScope) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.by_id.values().filter(|n| &n.scope == scope).collect();
        notes.sort_by_key(|n| n.created_at);
        notes
    }

    pub fn get(&self, id: &NoteId) -> Option<&Note> {
        self.by_id.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: &str, scope: NoteScope) -> Note {
        Note { id: NoteId::new(id), scope, text: "x".into(), created_at: Utc::now(), updated_at: Utc::now() }
    }

    #[test]
    fn for_scope_filters_by_exact_scope_match() {
        let mut store = NoteStore::default();
        store.upsert(note("n1", NoteScope::Global));
        store.upsert(note("n2", NoteScope::Workspace(fleet_protocol::WorkspaceId::new("w1"))));
        assert_eq!(store.for_scope(&NoteScope::Global).len(), 1);
        assert_eq!(store.for_scope(&NoteScope::Workspace(fleet_protocol::WorkspaceId::new("w1"))).len(), 1);
        assert_eq!(store.for_scope(&NoteScope::Workspace(fleet_protocol::WorkspaceId::new("w2"))).len(), 0);
    }
}
