use crate::ui::model::Model;

// Full frame: profile header, list or dialog area, modeline. Always exactly
// the terminal's height and width.
pub fn render_full(m: &Model) -> String {
    let mut lines = m.render_profile_block();
    for line in m.render_main_content().lines() {
        lines.push(line.to_string());
    }
    let modeline = crate::ui::render::modeline::render_modeline_padded(m);
    lines.push(modeline.lines().next().unwrap_or("").to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use crate::model::{Card, User};
    use crate::ui::Msg;
    use crate::ui::model::initial_model;
    use regex::Regex;

    // helper to strip ANSI CSI sequences from rendered output for assertions
    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            about: "out and about".to_string(),
            avatar: "https://example.test/a.jpg".to_string(),
        }
    }

    fn board(n: usize) -> crate::ui::Model {
        let me = user("u1", "Ada");
        let other = user("u2", "Brin");
        let cards: Vec<Card> = (0..n)
            .map(|i| Card {
                id: format!("c{i}"),
                name: format!("Place {i}"),
                link: format!("https://example.test/c{i}.jpg"),
                owner: if i % 2 == 0 { me.clone() } else { other.clone() },
                likes: if i % 3 == 0 {
                    vec![other.clone()]
                } else {
                    vec![]
                },
            })
            .collect();
        let mut m = initial_model();
        m.update(Msg::Loaded {
            user: me,
            cards,
        });
        m
    }

    #[test]
    fn render_full_matches_dimensions() {
        // sample sizes to validate behavior across different terminal shapes
        let sizes = [(80usize, 24usize), (100usize, 10usize), (40usize, 20usize)];

        for (w, h) in sizes.iter().cloned() {
            let mut m = board(30);
            m.update(Msg::WindowSize {
                width: w,
                height: h,
            });
            let out = m.render_full();
            let stripped = strip_ansi(&out);
            let lines: Vec<&str> = stripped.lines().collect();
            assert_eq!(
                lines.len(),
                h,
                "height mismatch for {}x{}: got {} lines\n<<output>>\n{}",
                w,
                h,
                lines.len(),
                stripped
            );
            for (idx, line) in lines.iter().enumerate() {
                let lw = line.chars().count();
                assert_eq!(
                    lw, w,
                    "width mismatch at line {idx} for {w}x{h}: got {lw} chars\nline: `{line}`\n<<output>>\n{stripped}"
                );
            }
        }
    }

    #[test]
    fn render_full_dialog_frame_keeps_dimensions() {
        let (w, h) = (80usize, 24usize);
        let mut m = board(5);
        m.update(Msg::WindowSize {
            width: w,
            height: h,
        });
        m.update(Msg::Rune('n'));
        let stripped = strip_ansi(&m.render_full());
        let lines: Vec<&str> = stripped.lines().collect();
        assert_eq!(lines.len(), h);
        for (idx, line) in lines.iter().enumerate() {
            assert_eq!(
                line.chars().count(),
                w,
                "width mismatch at line {idx}\nline: `{line}`"
            );
        }
        assert!(stripped.contains("New place"));
    }

    #[test]
    fn modeline_is_last_line_and_exact_width() {
        let (w, h) = (80usize, 24usize);
        let mut m = board(3);
        m.update(Msg::WindowSize {
            width: w,
            height: h,
        });
        let out = m.render_full();
        let stripped = strip_ansi(&out);
        let lines: Vec<&str> = stripped.lines().collect();
        assert!(!lines.is_empty(), "no lines rendered");
        let last = *lines.last().unwrap();
        assert_eq!(last.chars().count(), w);
        let modeline = crate::ui::render_modeline_padded(&m);
        let modeline_stripped = strip_ansi(&modeline);
        let modeline_first = modeline_stripped.lines().next().unwrap_or("");
        assert_eq!(
            last, modeline_first,
            "modeline content mismatch:\n<<output>>\n{stripped}"
        );
    }

    #[test]
    fn profile_box_is_first_block() {
        let (w, h) = (80usize, 24usize);
        let mut m = board(3);
        m.update(Msg::WindowSize {
            width: w,
            height: h,
        });
        let out = m.render_full();
        let stripped = strip_ansi(&out);
        let lines: Vec<&str> = stripped.lines().collect();
        let block = m.render_profile_block();
        let block_stripped = strip_ansi(&block.join("\n"));
        let block_lines: Vec<&str> = block_stripped.lines().collect();
        assert!(lines.len() >= block_lines.len());
        for (i, bl) in block_lines.iter().enumerate() {
            assert_eq!(lines[i], *bl, "profile block line {i} mismatch");
        }
        assert!(stripped.contains("Ada"));
    }

    #[test]
    fn main_content_fills_between_header_and_modeline() {
        let (w, h) = (30usize, 12usize);
        let mut m = board(40);
        m.update(Msg::WindowSize {
            width: w,
            height: h,
        });
        let stripped = strip_ansi(&m.render_full());
        let lines: Vec<&str> = stripped.lines().collect();
        assert_eq!(lines.len(), h);
        let header = crate::ui::model::PROFILE_BLOCK_LINES;
        let middle = &lines[header..lines.len() - 1];
        assert_eq!(middle.len(), m.per_page);
        // first visible row is the first card on the current page
        assert!(middle[0].contains("Place 0"), "`{}`", middle[0]);
    }
}
