use crate::layout::PointerFrame;
use crate::network::ActorId;

use super::super::{NodeAction, ViewModel};

impl ViewModel {
    pub(in crate::app) fn apply_node_actions(&mut self, pointer: &PointerFrame, canvas_clicked: bool) {
        let actions = std::mem::take(&mut *self.actions.borrow_mut());

        self.hovered = None;
        let mut selection = None;
        for action in actions {
            match action {
                NodeAction::Select(id) => selection = Some(id),
                NodeAction::Hover(id) => self.hovered = Some(id),
            }
        }

        if let Some(id) = selection {
            self.set_selected(Some(id));
        } else if canvas_clicked
            && self.selected.is_some()
            && pointer
                .position
                .is_some_and(|position| self.graph.node_at(position).is_none())
        {
            self.set_selected(None);
        }
    }

    pub(in crate::app) fn hover_text(&self, id: ActorId) -> Option<String> {
        let actor = self.network.actor(id)?;
        let mut text = actor.name.clone();

        if let Some(selected) = self.selected
            && selected != id
            && let Some(other) = self.network.actor(selected)
        {
            text.push_str(&format!(
                "  |  of {}: {:+.0}  |  {} of them: {:+.0}",
                other.name,
                self.network.opinion(id, selected),
                other.name,
                self.network.opinion(selected, id),
            ));
        } else {
            let connections = self.graph.connections(&id).len();
            text.push_str(&format!("  |  {connections} connections"));
        }

        Some(text)
    }
}
