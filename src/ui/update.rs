use crate::stats;
use crate::ui::model::{Dialog, Model, PendingDelete, PreviewTarget, card_node};
use crate::ui::{Effect, Msg, Op};
use bubbletea_widgets::Viewport;

pub fn handle_update(m: &mut Model, msg: Msg) -> Option<Effect> {
    match msg {
        Msg::WindowSize { width, height } => {
            handle_window_size(m, width, height);
            None
        }
        Msg::KeyUp => {
            handle_key_up(m);
            None
        }
        Msg::KeyDown => {
            handle_key_down(m);
            None
        }
        Msg::KeyEnter => handle_key_enter(m),
        Msg::KeyEsc => {
            handle_key_esc(m);
            None
        }
        Msg::KeyBackspace => {
            handle_key_backspace(m);
            None
        }
        Msg::KeyTab => {
            handle_key_tab(m);
            None
        }
        Msg::Rune(r) => handle_rune(m, r),
        Msg::Loaded { user, cards } => {
            handle_loaded(m, user, cards);
            None
        }
        Msg::LoadFailed(err) => {
            m.err = format!("load failed: {err}");
            None
        }
        Msg::ProfileSaved(user) => {
            handle_profile_saved(m, user);
            None
        }
        Msg::AvatarSaved(user) => {
            handle_avatar_saved(m, user);
            None
        }
        Msg::CardCreated(card) => {
            handle_card_created(m, card);
            None
        }
        Msg::CardDeleted { id } => {
            handle_card_deleted(m, &id);
            None
        }
        Msg::LikeSettled { id, card } => {
            handle_like_settled(m, &id, card);
            None
        }
        Msg::OpFailed { op, err } => {
            handle_op_failed(m, op, err);
            None
        }
    }
}

fn refresh_list(m: &mut Model) {
    let content = m.render_list_content();
    m.vp.set_content(&content);
}

fn handle_window_size(m: &mut Model, width: usize, height: usize) {
    m.screen_width = width;
    m.per_page = height.saturating_sub(crate::ui::model::RESERVED_LINES);
    m.vp = Viewport::new(m.per_page, m.screen_width);
    if m.page >= m.total_pages() {
        m.page = 0;
    }
    m.sync_page_to_selection();
    refresh_list(m);
}

fn handle_key_up(m: &mut Model) {
    if m.dialog.is_some() {
        focus_prev_field(m);
        return;
    }
    if m.selected > 0 {
        m.selected -= 1;
        m.sync_page_to_selection();
        refresh_list(m);
    }
}

fn handle_key_down(m: &mut Model) {
    if m.dialog.is_some() {
        focus_next_field(m);
        return;
    }
    if m.selected + 1 < m.nodes.len() {
        m.selected += 1;
        m.sync_page_to_selection();
        refresh_list(m);
    }
}

fn handle_key_enter(m: &mut Model) -> Option<Effect> {
    match m.dialog {
        None => {
            open_preview(m);
            None
        }
        Some(Dialog::EditProfile) => submit_profile(m),
        Some(Dialog::NewCard) => submit_card(m),
        Some(Dialog::EditAvatar) => submit_avatar(m),
        Some(Dialog::ConfirmDelete) => submit_delete(m),
        Some(Dialog::Preview) | Some(Dialog::Info) => {
            m.close_dialog();
            None
        }
    }
}

fn handle_key_esc(m: &mut Model) {
    // dismissal route; quitting from browse mode is the adapter's business
    if m.dialog.is_some() {
        m.close_dialog();
    }
}

fn handle_key_backspace(m: &mut Model) {
    match m.dialog {
        Some(Dialog::EditProfile) => {
            let f = &mut m.profile_form;
            if f.field == 0 {
                f.name.pop();
            } else {
                f.about.pop();
            }
        }
        Some(Dialog::NewCard) => {
            let f = &mut m.card_form;
            if f.field == 0 {
                f.name.pop();
            } else {
                f.link.pop();
            }
        }
        Some(Dialog::EditAvatar) => {
            m.avatar_form.url.pop();
        }
        _ => {}
    }
}

fn handle_key_tab(m: &mut Model) {
    focus_next_field(m);
}

fn focus_next_field(m: &mut Model) {
    match m.dialog {
        Some(Dialog::EditProfile) => m.profile_form.field = (m.profile_form.field + 1) % 2,
        Some(Dialog::NewCard) => m.card_form.field = (m.card_form.field + 1) % 2,
        _ => {}
    }
}

fn focus_prev_field(m: &mut Model) {
    // two fields at most, so previous and next coincide
    focus_next_field(m);
}

fn handle_rune(m: &mut Model, r: char) -> Option<Effect> {
    match m.dialog {
        None => handle_browse_rune(m, r),
        Some(Dialog::EditProfile) => {
            let f = &mut m.profile_form;
            if f.field == 0 {
                f.name.push(r);
            } else {
                f.about.push(r);
            }
            None
        }
        Some(Dialog::NewCard) => {
            let f = &mut m.card_form;
            if f.field == 0 {
                f.name.push(r);
            } else {
                f.link.push(r);
            }
            None
        }
        Some(Dialog::EditAvatar) => {
            m.avatar_form.url.push(r);
            None
        }
        Some(Dialog::Preview) | Some(Dialog::ConfirmDelete) | Some(Dialog::Info) => {
            // second dismiss trigger on dialogs that do not capture text
            if r == 'q' {
                m.close_dialog();
            }
            None
        }
    }
}

fn handle_browse_rune(m: &mut Model, r: char) -> Option<Effect> {
    match r {
        'e' => {
            open_profile_editor(m);
            None
        }
        'n' => {
            open_card_editor(m);
            None
        }
        'a' => {
            open_avatar_editor(m);
            None
        }
        'i' => {
            open_info(m);
            None
        }
        'l' | ' ' => request_like_toggle(m),
        'd' => {
            request_delete(m);
            None
        }
        _ => None,
    }
}

// prefill from the displayed profile, not from any earlier draft
fn open_profile_editor(m: &mut Model) {
    let Some(user) = &m.user else { return };
    m.profile_form.name = user.name.clone();
    m.profile_form.about = user.about.clone();
    m.profile_form.field = 0;
    m.open_dialog(Dialog::EditProfile);
}

fn open_card_editor(m: &mut Model) {
    m.card_form.name.clear();
    m.card_form.link.clear();
    m.card_form.field = 0;
    m.open_dialog(Dialog::NewCard);
}

fn open_avatar_editor(m: &mut Model) {
    m.avatar_form.url.clear();
    m.open_dialog(Dialog::EditAvatar);
}

fn open_info(m: &mut Model) {
    m.stats = Some(stats::aggregate(&m.cards));
    m.open_dialog(Dialog::Info);
}

fn open_preview(m: &mut Model) {
    let Some(node) = m.selected_node().cloned() else {
        return;
    };
    m.preview = Some(PreviewTarget {
        name: node.title,
        link: node.link,
    });
    m.open_dialog(Dialog::Preview);
}

// Like toggle: the displayed flag decides the request direction. The record's
// like list is deliberately not consulted here; the server echo reconciles
// the count afterwards.
fn request_like_toggle(m: &mut Model) -> Option<Effect> {
    let node = m.selected_node()?;
    Some(Effect::SetLike {
        id: node.id.clone(),
        already_liked: node.liked,
    })
}

// Deletion step 1: stage the target and ask for confirmation. No store call.
fn request_delete(m: &mut Model) {
    let Some(node) = m.selected_node().cloned() else {
        return;
    };
    if !node.deletable {
        // the affordance is hidden on foreign cards and must never fire
        return;
    }
    m.pending_delete = Some(PendingDelete {
        card_id: node.id.clone(),
        node,
    });
    m.open_dialog(Dialog::ConfirmDelete);
}

fn submit_profile(m: &mut Model) -> Option<Effect> {
    let f = &mut m.profile_form;
    if f.busy || f.name.trim().is_empty() || f.about.trim().is_empty() {
        return None;
    }
    f.busy = true;
    Some(Effect::SaveProfile {
        name: f.name.clone(),
        about: f.about.clone(),
    })
}

fn submit_avatar(m: &mut Model) -> Option<Effect> {
    let f = &mut m.avatar_form;
    if f.busy || f.url.trim().is_empty() {
        return None;
    }
    f.busy = true;
    Some(Effect::SaveAvatar { url: f.url.clone() })
}

fn submit_card(m: &mut Model) -> Option<Effect> {
    let f = &mut m.card_form;
    if f.busy || f.name.trim().is_empty() || f.link.trim().is_empty() {
        return None;
    }
    f.busy = true;
    Some(Effect::CreateCard {
        name: f.name.clone(),
        link: f.link.clone(),
    })
}

// Deletion step 2: only a staged target is ever submitted.
fn submit_delete(m: &mut Model) -> Option<Effect> {
    if m.confirm_busy {
        return None;
    }
    let pending = m.pending_delete.as_ref()?;
    m.confirm_busy = true;
    Some(Effect::DeleteCard {
        id: pending.card_id.clone(),
    })
}

fn handle_loaded(m: &mut Model, user: crate::model::User, cards: Vec<crate::model::Card>) {
    m.user = Some(user);
    m.cards = cards;
    m.selected = 0;
    m.page = 0;
    m.rebuild_nodes();
    refresh_list(m);
}

fn handle_profile_saved(m: &mut Model, user: crate::model::User) {
    m.profile_form.busy = false;
    // display the server echo, not the raw input
    m.user = Some(user);
    if m.dialog == Some(Dialog::EditProfile) {
        m.close_dialog();
    }
}

fn handle_avatar_saved(m: &mut Model, user: crate::model::User) {
    m.avatar_form.busy = false;
    m.user = Some(user);
    if m.dialog == Some(Dialog::EditAvatar) {
        m.close_dialog();
    }
}

fn handle_card_created(m: &mut Model, card: crate::model::Card) {
    m.card_form.busy = false;
    let me = m.current_user_id().to_string();
    let node = card_node(&card, &me);
    m.cards.insert(0, card);
    m.nodes.insert(0, node);
    m.card_form.name.clear();
    m.card_form.link.clear();
    m.card_form.field = 0;
    m.selected = 0;
    m.page = 0;
    if m.dialog == Some(Dialog::NewCard) {
        m.close_dialog();
    }
    refresh_list(m);
}

fn handle_card_deleted(m: &mut Model, id: &str) {
    m.confirm_busy = false;
    if let Some(pos) = m.node_index(id) {
        m.nodes.remove(pos);
    }
    m.cards.retain(|c| c.id != id);
    if m.selected >= m.nodes.len() {
        m.selected = m.nodes.len().saturating_sub(1);
    }
    if m.dialog == Some(Dialog::ConfirmDelete) {
        m.close_dialog();
    }
    refresh_list(m);
}

// Reconcile one node from the authoritative echo: flip the flag, take the
// count from the returned like list. Out-of-order settlements land on the
// node carrying the matching id.
fn handle_like_settled(m: &mut Model, id: &str, card: crate::model::Card) {
    if let Some(pos) = m.node_index(id) {
        let node = &mut m.nodes[pos];
        node.liked = !node.liked;
        node.like_count = card.likes.len();
    }
    if let Some(pos) = m.cards.iter().position(|c| c.id == id) {
        m.cards[pos] = card;
    }
    refresh_list(m);
}

fn handle_op_failed(m: &mut Model, op: Op, err: String) {
    m.err = err;
    match op {
        Op::SaveProfile => m.profile_form.busy = false,
        Op::SaveAvatar => m.avatar_form.busy = false,
        Op::CreateCard => m.card_form.busy = false,
        Op::DeleteCard => {
            m.confirm_busy = false;
            // terminal case for the handoff: the dialog stays open but a new
            // deletion must be staged before another submit does anything
            m.pending_delete = None;
        }
        Op::SetLike => {}
    }
}
