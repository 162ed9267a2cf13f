use crate::ui::model::{DEFAULT_WIDTH, Model};
use crate::ui::render::styles::STYLE_MODELINE;
use lipgloss::Color;

pub fn render_modeline(m: &Model, inner_max: usize, mode: &str) -> String {
    // Build styled pairs, compute plain widths, and fit the right side into
    // the remaining space.
    let inner_style = STYLE_MODELINE.clone().padding(0, 0, 0, 0);
    let key_style = STYLE_MODELINE
        .clone()
        .foreground(Color::from_rgb(238, 0, 238))
        .bold(true)
        .padding(0, 0, 0, 0);
    let desc_style = STYLE_MODELINE.clone().padding(0, 0, 0, 0);
    let right_style = STYLE_MODELINE.clone().faint(true).padding(0, 0, 0, 0);
    let err_style = STYLE_MODELINE
        .clone()
        .foreground(Color::from_rgb(255, 160, 120))
        .padding(0, 0, 0, 0);

    // key/description pairs depend on whether a dialog is open
    let pairs_def: Vec<(&str, &str)> = if m.dialog.is_some() {
        vec![("⏎", "submit"), ("⇥", "field"), ("⎋", "close")]
    } else {
        vec![
            ("⏎", "view"),
            ("l", "like"),
            ("d", "delete"),
            ("n", "new"),
            ("e", "profile"),
            ("a", "avatar"),
            ("i", "stats"),
            ("⎋", "quit"),
        ]
    };

    let pairs: Vec<(String, usize)> = pairs_def
        .iter()
        .map(|(k, d)| {
            let plain_len = d.chars().count() + 1 + k.chars().count();
            let rendered = format!(
                "{}{}{}",
                desc_style.render(d),
                inner_style.render(":"),
                key_style.render(k)
            );
            (rendered, plain_len)
        })
        .collect();

    let pair_sep_rendered = inner_style.render("  ");
    let pair_sep_width = 2usize;

    // right side: the last failure wins over pagination
    let total_pages = m.total_pages();
    let (mut right_plain, mut right_rendered) = if !m.err.is_empty() {
        (m.err.clone(), err_style.render(&m.err))
    } else if total_pages > 1 {
        let p = format!("Page {}/{}", m.page + 1, total_pages);
        (p.clone(), right_style.render(&p))
    } else {
        (String::new(), String::new())
    };
    let mut right_width = right_plain.chars().count();

    let mut pairs_count = pairs.len();
    let mut left_joined_rendered = pairs
        .iter()
        .map(|(r, _)| r.clone())
        .collect::<Vec<_>>()
        .join(&pair_sep_rendered);
    let mut left_width = pairs.iter().map(|(_, w)| *w).sum::<usize>()
        + pair_sep_width * pairs_count.saturating_sub(1);

    let mode_len = mode.chars().count();
    let mode_padding = 2usize;
    let mode_w = mode_len + mode_padding;
    let sep_w = " | ".chars().count();

    let avail = if inner_max > mode_w + sep_w {
        inner_max - mode_w - sep_w
    } else {
        0
    };

    // drop rightmost pairs until left + right fits into avail
    while pairs_count > 0 && left_width + right_width > avail {
        pairs_count -= 1;
        if pairs_count > 0 {
            left_width = pairs
                .iter()
                .take(pairs_count)
                .map(|(_, w)| *w)
                .sum::<usize>()
                + pair_sep_width * (pairs_count - 1);
            left_joined_rendered = pairs
                .iter()
                .take(pairs_count)
                .map(|(r, _)| r.clone())
                .collect::<Vec<_>>()
                .join(&pair_sep_rendered);
        } else {
            left_width = 0;
            left_joined_rendered.clear();
        }
    }

    // if the right side alone still overflows, truncate it
    if right_width > avail && !right_plain.is_empty() {
        right_plain = right_plain.chars().take(avail.saturating_sub(1)).collect();
        right_width = right_plain.chars().count();
        right_rendered = if m.err.is_empty() {
            right_style.render(&right_plain)
        } else {
            err_style.render(&right_plain)
        };
    }

    let pad = if avail > left_width + right_width + 2 {
        avail - left_width - right_width - 2
    } else {
        0
    };
    let filler = if pad > 0 {
        STYLE_MODELINE.clone().width(pad as i32).render("")
    } else {
        String::new()
    };

    let footer_inner = format!("{left_joined_rendered}{filler}{right_rendered}");

    let mode_style = STYLE_MODELINE
        .clone()
        .background(Color::from_rgb(101, 101, 101))
        .padding(0, 1, 0, 1)
        .bold(true);
    let mode_styled = mode_style.render(mode);

    let sep_styled = inner_style.render(" | ");
    let trailing_pad = STYLE_MODELINE.render(" ");

    format!("{mode_styled}{sep_styled}{footer_inner}{trailing_pad}")
}

pub fn render_modeline_padded(m: &Model) -> String {
    let total_width = if m.screen_width > 0 {
        m.screen_width
    } else {
        DEFAULT_WIDTH
    };
    let inner_max = if total_width > 0 {
        total_width.saturating_sub(2) - 1
    } else {
        DEFAULT_WIDTH
    };
    let mode = m.mode();
    let modeline = render_modeline(m, inner_max, &mode);
    let modeline_single = modeline.replace('\n', " ");
    STYLE_MODELINE
        .clone()
        .width(total_width as i32)
        .render(&modeline_single)
}

#[cfg(test)]
mod tests {
    use crate::ui::Msg;
    use crate::ui::model::initial_model;
    use regex::Regex;

    fn strip_ansi(s: &str) -> String {
        let re = Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").unwrap();
        re.replace_all(s, "").to_string()
    }

    #[test]
    fn test_modeline_fits_width() {
        let mut m = initial_model();
        m.update(Msg::WindowSize {
            width: 80,
            height: 24,
        });
        let modeline = crate::ui::render_modeline_padded(&m);
        let stripped = strip_ansi(&modeline);
        assert!(stripped.lines().next().unwrap_or("").chars().count() <= 80);
    }

    #[test]
    fn test_modeline_shows_mode_and_error_tail() {
        let mut m = initial_model();
        m.update(Msg::WindowSize {
            width: 100,
            height: 24,
        });
        m.err = "load failed: offline".to_string();
        let stripped = strip_ansi(&crate::ui::render_modeline_padded(&m));
        assert!(stripped.contains("plaza"));
        assert!(stripped.contains("load failed: offline"));
    }

    #[test]
    fn test_modeline_hints_switch_with_dialog() {
        let mut m = initial_model();
        m.update(Msg::WindowSize {
            width: 100,
            height: 24,
        });
        let browse = strip_ansi(&crate::ui::render_modeline_padded(&m));
        assert!(browse.contains("like"));
        m.open_dialog(crate::ui::Dialog::NewCard);
        let dialog = strip_ansi(&crate::ui::render_modeline_padded(&m));
        assert!(dialog.contains("submit"));
        assert!(!dialog.contains("delete"));
    }
}
