use crate::ui::model::{DEFAULT_WIDTH, Dialog, Model};
use crate::ui::render::styles::{STYLE_BOX, STYLE_BUTTON, STYLE_DESC, STYLE_NAME};

fn submit_button(labels: &(String, String), busy: bool) -> String {
    let label = if busy { &labels.1 } else { &labels.0 };
    STYLE_BUTTON.render(&format!("[ {label} ]"))
}

fn field_line(label: &str, value: &str, focused: bool) -> String {
    let marker = if focused { "> " } else { "  " };
    format!("{marker}{} {value}", STYLE_DESC.render(label))
}

fn dialog_lines(m: &Model) -> Vec<String> {
    match m.dialog {
        Some(Dialog::EditProfile) => {
            let f = &m.profile_form;
            vec![
                STYLE_NAME.render("Edit profile"),
                String::new(),
                field_line("Name: ", &f.name, f.field == 0),
                field_line("About:", &f.about, f.field == 1),
                String::new(),
                submit_button(&m.labels.save, f.busy),
            ]
        }
        Some(Dialog::NewCard) => {
            let f = &m.card_form;
            vec![
                STYLE_NAME.render("New place"),
                String::new(),
                field_line("Title:", &f.name, f.field == 0),
                field_line("Link: ", &f.link, f.field == 1),
                String::new(),
                submit_button(&m.labels.create, f.busy),
            ]
        }
        Some(Dialog::EditAvatar) => {
            let f = &m.avatar_form;
            vec![
                STYLE_NAME.render("Change avatar"),
                String::new(),
                field_line("Link: ", &f.url, true),
                String::new(),
                submit_button(&m.labels.save, f.busy),
            ]
        }
        Some(Dialog::ConfirmDelete) => match &m.pending_delete {
            Some(p) => vec![
                STYLE_NAME.render("Are you sure?"),
                String::new(),
                format!("Delete \"{}\"", p.node.title),
                String::new(),
                submit_button(&m.labels.confirm, m.confirm_busy),
            ],
            // a failed attempt empties the staged target; the dialog can only
            // be dismissed from here
            None => vec![
                STYLE_NAME.render("Are you sure?"),
                String::new(),
                STYLE_DESC.render("nothing to delete, press Esc"),
            ],
        },
        Some(Dialog::Preview) => match &m.preview {
            Some(p) => vec![
                STYLE_NAME.render(&p.name),
                String::new(),
                STYLE_DESC.render(&p.link),
            ],
            None => vec![],
        },
        Some(Dialog::Info) => {
            let Some(s) = &m.stats else {
                return vec![];
            };
            let mut lines = vec![
                STYLE_NAME.render("Board statistics"),
                String::new(),
                format!("people on the board  {}", s.total_users),
                format!("likes given          {}", s.total_likes),
            ];
            match &s.champion {
                Some(u) => lines.push(format!(
                    "top liker            {} ({} likes)",
                    u.name, s.max_likes_from_single_user
                )),
                None => lines.push("top liker            nobody yet".to_string()),
            }
            lines.push(String::new());
            lines.push(STYLE_DESC.render("most liked places"));
            for (i, p) in s.popular.iter().enumerate() {
                lines.push(format!("  {}. {}  ♥ {}", i + 1, p.name, p.likes));
            }
            lines
        }
        None => vec![],
    }
}

// Box the active dialog's lines the same way the header is boxed; the caller
// pads the result to the list area's height.
pub fn render_dialog_block(m: &Model) -> Vec<String> {
    let lines = dialog_lines(m);
    if lines.is_empty() {
        return vec![];
    }
    let box_width = if m.screen_width >= 2 {
        m.screen_width - 2
    } else {
        DEFAULT_WIDTH
    };
    let w_i32: i32 = box_width.try_into().unwrap_or(i32::MAX);
    let block = STYLE_BOX.clone().width(w_i32).render(&lines.join("\n"));
    block.lines().map(|s| s.to_string()).collect()
}
