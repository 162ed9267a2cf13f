use crate::model::{Card, User};
use crate::stats::Stats;
use bubbletea_widgets::Viewport;

// small constants reused by rendering code
pub const PROFILE_BLOCK_LINES: usize = 4;
pub const MODELINE_LINES: usize = 1;
pub const RESERVED_LINES: usize = PROFILE_BLOCK_LINES + MODELINE_LINES;
pub const DEFAULT_WIDTH: usize = 80;

// Rendered representation of one card in the visible list. Built once from
// the authoritative record; `liked` and `like_count` change only through the
// like handler, `deletable` is fixed at render time.
#[derive(Clone, Debug, PartialEq)]
pub struct CardNode {
    pub id: String,
    pub title: String,
    pub link: String,
    pub like_count: usize,
    pub liked: bool,
    pub deletable: bool,
}

// Card renderer: populate the node from the record and the current viewer.
// Insertion into the visible list is the caller's job.
pub fn card_node(card: &Card, current_user_id: &str) -> CardNode {
    CardNode {
        id: card.id.clone(),
        title: card.name.clone(),
        link: card.link.clone(),
        like_count: card.likes.len(),
        liked: card.is_liked_by(current_user_id),
        deletable: card.is_owned_by(current_user_id),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialog {
    EditProfile,
    NewCard,
    EditAvatar,
    Preview,
    ConfirmDelete,
    Info,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileForm {
    pub name: String,
    pub about: String,
    pub field: usize,
    pub busy: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardForm {
    pub name: String,
    pub link: String,
    pub field: usize,
    pub busy: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AvatarForm {
    pub url: String,
    pub busy: bool,
}

// Transient handoff between the delete affordance and the confirm dialog.
// At most one exists; it is cleared whenever the dialog closes.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingDelete {
    pub card_id: String,
    pub node: CardNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewTarget {
    pub name: String,
    pub link: String,
}

// Submit-button phrases, one (idle, in-progress) pair per operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Labels {
    pub save: (String, String),
    pub create: (String, String),
    pub confirm: (String, String),
}

impl Default for Labels {
    fn default() -> Self {
        Labels {
            save: ("Save".to_string(), "Saving...".to_string()),
            create: ("Create".to_string(), "Creating...".to_string()),
            confirm: ("Yes".to_string(), "Deleting...".to_string()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Model {
    pub user: Option<User>,
    pub cards: Vec<Card>,
    pub nodes: Vec<CardNode>,
    pub selected: usize,
    pub dialog: Option<Dialog>,
    pub pending_delete: Option<PendingDelete>,
    pub preview: Option<PreviewTarget>,
    pub stats: Option<Stats>,
    pub profile_form: ProfileForm,
    pub card_form: CardForm,
    pub avatar_form: AvatarForm,
    pub confirm_busy: bool,
    pub labels: Labels,
    pub err: String,
    // pagination
    pub page: usize,
    pub per_page: usize,
    pub screen_width: usize,
    // viewport using bubbletea widgets
    pub vp: Viewport,
}

pub fn initial_model() -> Model {
    Model::default()
}

impl Model {
    // wrapper update that delegates to the update module
    pub fn update(&mut self, msg: crate::ui::Msg) -> Option<crate::ui::Effect> {
        crate::ui::update::handle_update(self, msg)
    }

    pub fn current_user_id(&self) -> &str {
        self.user.as_ref().map(|u| u.id.as_str()).unwrap_or("")
    }

    pub fn mode(&self) -> String {
        match self.dialog {
            Some(Dialog::EditProfile) => "edit profile".to_string(),
            Some(Dialog::NewCard) => "new card".to_string(),
            Some(Dialog::EditAvatar) => "edit avatar".to_string(),
            Some(Dialog::Preview) => "preview".to_string(),
            Some(Dialog::ConfirmDelete) => "confirm delete".to_string(),
            Some(Dialog::Info) => "info".to_string(),
            None => match &self.user {
                Some(u) if !u.name.is_empty() => u.name.clone(),
                _ => "plaza".to_string(),
            },
        }
    }

    // Modal workflow controller. Only one dialog is ever open; browse-mode
    // handlers call `open_dialog` only when none is.
    pub fn open_dialog(&mut self, dialog: Dialog) {
        self.dialog = Some(dialog);
    }

    // Idempotent close shared by every dismissal route (primary action
    // completed, Esc, or the secondary dismiss key). Clearing the pending
    // deletion here keeps the PendingDelete invariant in one place.
    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.pending_delete = None;
        self.preview = None;
        self.stats = None;
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }

    pub fn selected_node(&self) -> Option<&CardNode> {
        self.nodes.get(self.selected)
    }

    // rebuild every node from the authoritative records (initial load)
    pub fn rebuild_nodes(&mut self) {
        let me = self.current_user_id().to_string();
        self.nodes = self.cards.iter().map(|c| card_node(c, &me)).collect();
        if self.selected >= self.nodes.len() {
            self.selected = self.nodes.len().saturating_sub(1);
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.nodes.is_empty() || self.per_page == 0 {
            1
        } else {
            self.nodes.len().div_ceil(self.per_page)
        }
    }

    // keep the page containing the selection in view
    pub fn sync_page_to_selection(&mut self) {
        if self.per_page > 0 {
            self.page = self.selected / self.per_page;
        }
    }

    // Render helper wrappers that forward to the render module to keep this file focused on state.
    pub fn render_profile_block(&self) -> Vec<String> {
        crate::ui::render::render_profile_block(self)
    }
    pub fn render_list_content(&self) -> String {
        crate::ui::render::render_list_content(self)
    }
    pub fn render_main_content(&self) -> String {
        crate::ui::render::render_main_content(self)
    }
    pub fn render_full(&self) -> String {
        crate::ui::render::render_full(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            about: String::new(),
            avatar: String::new(),
        }
    }

    fn card(id: &str, name: &str, owner: &User, likes: Vec<User>) -> Card {
        Card {
            id: id.to_string(),
            name: name.to_string(),
            link: format!("https://example.test/{id}.jpg"),
            owner: owner.clone(),
            likes,
        }
    }

    #[test]
    fn test_card_node_own_card_is_deletable() {
        let me = user("u1", "Ada");
        let c = card("c1", "Pier", &me, vec![]);
        let node = card_node(&c, "u1");
        assert!(node.deletable);
        assert!(!node.liked);
        assert_eq!(node.like_count, 0);
        assert_eq!(node.id, "c1");
        assert_eq!(node.title, "Pier");
    }

    #[test]
    fn test_card_node_foreign_card_hides_delete() {
        let other = user("u2", "Brin");
        let c = card("c1", "Pier", &other, vec![]);
        let node = card_node(&c, "u1");
        assert!(!node.deletable);
    }

    #[test]
    fn test_card_node_liked_at_render_time() {
        let other = user("u2", "Brin");
        let me = user("u1", "Ada");
        let c = card("c1", "Pier", &other, vec![me.clone(), other.clone()]);
        let node = card_node(&c, "u1");
        assert!(node.liked);
        assert_eq!(node.like_count, 2);
        let node2 = card_node(&c, "u3");
        assert!(!node2.liked);
    }

    #[test]
    fn test_close_dialog_clears_pending_and_is_idempotent() {
        let mut m = initial_model();
        let me = user("u1", "Ada");
        let c = card("c1", "Pier", &me, vec![]);
        let node = card_node(&c, "u1");
        m.open_dialog(Dialog::ConfirmDelete);
        m.pending_delete = Some(PendingDelete {
            card_id: "c1".to_string(),
            node,
        });
        m.close_dialog();
        assert!(m.dialog.is_none());
        assert!(m.pending_delete.is_none());
        // closing again is harmless
        m.close_dialog();
        assert!(m.dialog.is_none());
    }

    #[test]
    fn test_mode_follows_dialog_then_user() {
        let mut m = initial_model();
        assert_eq!(m.mode(), "plaza");
        m.user = Some(user("u1", "Ada"));
        assert_eq!(m.mode(), "Ada");
        m.open_dialog(Dialog::NewCard);
        assert_eq!(m.mode(), "new card");
        m.close_dialog();
        assert_eq!(m.mode(), "Ada");
    }

    #[test]
    fn test_rebuild_nodes_matches_cards_and_clamps_selection() {
        let mut m = initial_model();
        let me = user("u1", "Ada");
        let other = user("u2", "Brin");
        m.user = Some(me.clone());
        m.cards = vec![
            card("c1", "Pier", &me, vec![other.clone()]),
            card("c2", "Dunes", &other, vec![]),
        ];
        m.selected = 5;
        m.rebuild_nodes();
        assert_eq!(m.nodes.len(), 2);
        assert!(m.nodes[0].deletable);
        assert!(!m.nodes[1].deletable);
        assert_eq!(m.selected, 1);
    }

    #[test]
    fn test_labels_defaults_per_operation() {
        let labels = Labels::default();
        assert_eq!(labels.save.0, "Save");
        assert_eq!(labels.save.1, "Saving...");
        assert_eq!(labels.create.1, "Creating...");
        assert_eq!(labels.confirm.1, "Deleting...");
    }
}
