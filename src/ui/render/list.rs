use crate::ui::model::{CardNode, DEFAULT_WIDTH, Model};
use crate::ui::render::styles::{
    STYLE_DESC, STYLE_LIKE_OFF, STYLE_LIKE_ON, STYLE_LINENUM, STYLE_SELECTED, STYLE_TITLE,
};
use crate::ui::render::util::fit_block;

fn compute_gutter_width(total: usize) -> usize {
    if total == 0 {
        return 1;
    }
    let gw = ((total as f64).log10().floor() as usize) + 1;
    usize::max(gw, 3)
}

fn format_num_str(num: usize, gutter_width: usize) -> String {
    format!("{:>1$} │ ", num, gutter_width)
}

fn heart(node: &CardNode) -> String {
    let mark = format!("♥ {}", node.like_count);
    if node.liked {
        STYLE_LIKE_ON.render(&mark)
    } else {
        STYLE_LIKE_OFF.render(&mark)
    }
}

// One visible row: gutter number, selection marker, title, like count and an
// ownership tag on cards the viewer may delete.
fn render_node_line(node: &CardNode, is_selected: bool, num_str: String) -> String {
    let marker = if is_selected { "> " } else { "  " };
    let title = if is_selected {
        STYLE_SELECTED.render(&node.title)
    } else {
        STYLE_TITLE.render(&node.title)
    };
    let mut pieces: Vec<String> = vec![
        STYLE_LINENUM.render(&num_str),
        marker.to_string(),
        title,
        "  ".to_string(),
        heart(node),
    ];
    if node.deletable {
        pieces.push(STYLE_DESC.render("  yours"));
    }
    pieces.join("")
}

pub fn render_list_content(m: &Model) -> String {
    let total = m.nodes.len();
    if total == 0 {
        return STYLE_DESC.render("no cards");
    }
    let per = if m.per_page == 0 { total } else { m.per_page };
    if per == 0 {
        return String::new();
    }
    let start = m.page.saturating_mul(per);
    let end = usize::min(start + per, total);
    let gutter_width = compute_gutter_width(total);

    let mut b = String::new();
    for (idx, node) in m.nodes.iter().enumerate().skip(start).take(end.saturating_sub(start)) {
        let line = render_node_line(node, idx == m.selected, format_num_str(idx + 1, gutter_width));
        b.push_str(&line);
        b.push('\n');
    }
    b
}

pub fn render_main_content(m: &Model) -> String {
    let total_width = if m.screen_width > 0 {
        m.screen_width
    } else {
        DEFAULT_WIDTH
    };

    // an open dialog replaces the list area entirely (single active dialog)
    if m.dialog.is_some() {
        let lines = crate::ui::render::dialog::render_dialog_block(m);
        let per = if m.per_page == 0 { lines.len() } else { m.per_page };
        return fit_block(lines, total_width, per);
    }

    let list_block = render_list_content(m);
    let lines: Vec<String> = list_block.lines().map(|s| s.to_string()).collect();
    let per = if m.per_page == 0 { lines.len() } else { m.per_page };
    // Ensure we return exactly `per` lines each normalized to the terminal width.
    fit_block(lines, total_width, per)
}

#[cfg(test)]
mod tests {
    use crate::model::{Card, User};
    use crate::ui::Msg;
    use crate::ui::model::initial_model;
    use regex::Regex;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

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
    fn test_list_shows_gutter_title_and_count() {
        let me = user("u1", "Ada");
        let other = user("u2", "Brin");
        let mut m = initial_model();
        m.update(Msg::Loaded {
            user: me.clone(),
            cards: vec![
                card("c1", "Pier", &me, vec![other.clone()]),
                card("c2", "Dunes", &other, vec![]),
            ],
        });
        let out = strip_ansi(&m.render_list_content());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" 1 │ "), "{}", lines[0]);
        assert!(lines[0].contains("Pier"));
        assert!(lines[0].contains("♥ 1"));
        // ownership tag only on the viewer's card
        assert!(lines[0].contains("yours"));
        assert!(lines[1].contains(" 2 │ "));
        assert!(lines[1].contains("Dunes"));
        assert!(!lines[1].contains("yours"));
    }

    #[test]
    fn test_selection_marker_follows_cursor() {
        let other = user("u2", "Brin");
        let mut m = initial_model();
        m.update(Msg::Loaded {
            user: user("u1", "Ada"),
            cards: vec![
                card("c1", "Pier", &other, vec![]),
                card("c2", "Dunes", &other, vec![]),
            ],
        });
        m.update(Msg::KeyDown);
        let out = strip_ansi(&m.render_list_content());
        let lines: Vec<&str> = out.lines().collect();
        assert!(!lines[0].contains("> "));
        assert!(lines[1].contains("> "));
    }

    #[test]
    fn test_pagination_slices_rows() {
        let other = user("u2", "Brin");
        let cards: Vec<Card> = (0..10)
            .map(|i| card(&format!("c{i}"), &format!("Place{i}"), &other, vec![]))
            .collect();
        let mut m = initial_model();
        m.update(Msg::Loaded {
            user: user("u1", "Ada"),
            cards,
        });
        m.per_page = 4;
        m.page = 1;
        let out = strip_ansi(&m.render_list_content());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Place4"));
        assert!(lines[3].contains("Place7"));
    }

    #[test]
    fn test_empty_board_placeholder() {
        let m = initial_model();
        let out = strip_ansi(&m.render_list_content());
        assert!(out.contains("no cards"));
    }
}
