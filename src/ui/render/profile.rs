use crate::ui::model::{DEFAULT_WIDTH, Model, PROFILE_BLOCK_LINES};
use crate::ui::render::styles::{STYLE_ABOUT, STYLE_BOX, STYLE_NAME};

// Fixed-height header box showing the displayed profile. Mutation handlers
// overwrite `m.user` with the server echo; this only renders what is there.
pub fn render_profile_block(m: &Model) -> Vec<String> {
    let (who, avatar) = match &m.user {
        Some(u) => (
            format!("{}  {}", STYLE_NAME.render(&u.name), STYLE_ABOUT.render(&u.about)),
            STYLE_ABOUT.render(&u.avatar),
        ),
        None => (
            STYLE_NAME.render("plaza"),
            STYLE_ABOUT.render("loading profile..."),
        ),
    };
    let box_width = if m.screen_width >= 2 {
        m.screen_width - 2
    } else {
        DEFAULT_WIDTH
    };
    let w_i32: i32 = box_width.try_into().unwrap_or(i32::MAX);
    let inner = format!("{who}\n{avatar}");
    let block = STYLE_BOX.clone().width(w_i32).render(&inner);
    let mut out: Vec<String> = block.lines().map(|s| s.to_string()).collect();
    // the header always occupies exactly PROFILE_BLOCK_LINES lines
    out.truncate(PROFILE_BLOCK_LINES);
    while out.len() < PROFILE_BLOCK_LINES {
        out.push(String::new());
    }
    out
}
