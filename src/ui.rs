// UI module root: split implementation into focused submodules under `ui/`

pub mod model;
pub mod render;
pub mod run;
pub mod update;

// Re-export commonly used symbols so call sites can use `crate::ui::initial_model` etc.
pub use model::{CardNode, Dialog, Model, card_node, initial_model};
pub use render::{render_full, render_main_content, render_modeline_padded, render_profile_block};
pub use run::run;
pub use update::handle_update;

use crate::model::{Card, User};

// Messages consumed by the update logic. Key and window messages come from
// the terminal; the store variants are mutation resolutions, delivered in
// whatever order the futures actually settle.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    WindowSize { width: usize, height: usize },
    KeyUp,
    KeyDown,
    KeyEnter,
    KeyEsc,
    KeyBackspace,
    KeyTab,
    Rune(char),
    Loaded { user: User, cards: Vec<Card> },
    LoadFailed(String),
    ProfileSaved(User),
    AvatarSaved(User),
    CardCreated(Card),
    CardDeleted { id: String },
    LikeSettled { id: String, card: Card },
    OpFailed { op: Op, err: String },
}

// Names the mutation a failure belongs to, so the right busy flag is released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    SaveProfile,
    SaveAvatar,
    CreateCard,
    DeleteCard,
    SetLike,
}

// Store work requested by a handler; ui/run.rs maps these onto async commands
// against the Store. Update itself never blocks.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadAll,
    SaveProfile { name: String, about: String },
    SaveAvatar { url: String },
    CreateCard { name: String, link: String },
    DeleteCard { id: String },
    SetLike { id: String, already_liked: bool },
}
