//! Forward-looking level-up hints: "how many more stars do I need?"
//!
//! Ground truth is a brute-force search over every outcome sequence up to
//! five rounds ahead, simulating the rolling window and testing the same
//! predicate the progression machine uses. Closed-form shortcuts exist for
//! one- and two-star windows and must agree with the search; rendering
//! always uses the search result.

use crate::types::StarWindow;

/// Minimal `(stars, rounds)` needed to trigger a level-up from this window,
/// minimized lexicographically: fewest stars first, then fewest rounds.
///
/// All-stars over five rounds always triggers, so a plan always exists;
/// `(3, 5)` is the unreachable fallback.
pub fn minimal_plan(window: &StarWindow) -> (usize, usize) {
    let mut best: Option<(usize, usize)> = None;
    for horizon in 1..=StarWindow::DECISION_SPAN {
        for mask in 0u32..(1 << horizon) {
            let stars = mask.count_ones() as usize;
            let mut simulated = window.clone();
            let mut triggered = false;
            for round in 0..horizon {
                let star = (mask >> round) & 1 == 1;
                simulated.push(star);
                if star && simulated.qualifies() {
                    triggered = true;
                    break;
                }
            }
            if triggered && best.map_or(true, |b| (stars, horizon) < b) {
                best = Some((stars, horizon));
            }
        }
    }
    best.unwrap_or((3, StarWindow::DECISION_SPAN))
}

/// Rounds before the oldest star in the 5-round window falls out of it.
/// Zero when the window holds no stars.
pub fn oldest_star_life(window: &StarWindow) -> usize {
    let recent: Vec<char> = window
        .as_string()
        .chars()
        .rev()
        .take(StarWindow::DECISION_SPAN)
        .collect();
    let len = recent.len();
    match recent.iter().rev().position(|c| *c == '1') {
        Some(oldest_index) => (StarWindow::DECISION_SPAN - len) + oldest_index,
        None => 0,
    }
}

/// Closed-form star count for sparse windows: a one-star window needs two
/// more while the star survives; a two-star window needs one more, provided
/// a star sits in the last two rounds so the 3-round sub-window can carry
/// its share. Returns None when the shortcut does not apply; a presentation
/// optimization only, checked against [`minimal_plan`] in tests.
pub fn closed_form_stars_needed(window: &StarWindow) -> Option<usize> {
    let stars = window.ones_in_last(StarWindow::DECISION_SPAN);
    let life = oldest_star_life(window);
    match stars {
        1 if life >= 2 => Some(2),
        2 if life >= 1 && window.ones_in_last(2) >= 1 => Some(1),
        _ => None,
    }
}

/// Human-readable hint for the stored window, as shown on the dashboard
/// (no hypothetical current round included).
pub fn need_hint(window: &StarWindow) -> String {
    if window.ones_in_last(StarWindow::DECISION_SPAN) == 0 {
        return "Need 3 stars in the next 5 rounds to level up".to_string();
    }
    let (stars, rounds) = minimal_plan(window);
    if stars == 1 && rounds == 1 {
        "Need a star next round to level up".to_string()
    } else {
        format!("Need {stars} of the next {rounds} rounds to level up")
    }
}

/// Hint after the just-finished round's outcome has been taken into account.
pub fn need_hint_after(window: &StarWindow, star: bool) -> String {
    need_hint(&window.with_appended(star))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(s: &str) -> StarWindow {
        StarWindow::from(s.to_string())
    }

    #[test]
    fn zero_star_window_needs_three_of_five() {
        assert_eq!(
            need_hint(&window("00000")),
            "Need 3 stars in the next 5 rounds to level up"
        );
        assert_eq!(
            need_hint(&window("")),
            "Need 3 stars in the next 5 rounds to level up"
        );
        // The short-circuit must agree with the search on the star count.
        assert_eq!(minimal_plan(&window("00000")).0, 3);
        assert_eq!(minimal_plan(&window("")).0, 3);
    }

    #[test]
    fn two_recent_stars_need_one_more_next_round() {
        assert_eq!(need_hint(&window("11")), "Need a star next round to level up");
        assert_eq!(minimal_plan(&window("11")), (1, 1));
        assert_eq!(minimal_plan(&window("011")), (1, 1));
    }

    #[test]
    fn single_star_needs_two_more() {
        assert_eq!(minimal_plan(&window("1")), (2, 2));
        assert_eq!(need_hint(&window("1")), "Need 2 of the next 2 rounds to level up");
    }

    #[test]
    fn expired_stars_do_not_help() {
        // Post-window "10001"-style histories: the old pair is about to
        // leave the window, so three fresh stars are needed.
        assert_eq!(minimal_plan(&window("11000")), (3, 3));
    }

    #[test]
    fn oldest_star_life_counts_rounds_until_expiry() {
        assert_eq!(oldest_star_life(&window("")), 0);
        assert_eq!(oldest_star_life(&window("00000")), 0);
        assert_eq!(oldest_star_life(&window("1")), 4);
        assert_eq!(oldest_star_life(&window("10000")), 0);
        assert_eq!(oldest_star_life(&window("01010")), 1);
        assert_eq!(oldest_star_life(&window("00001")), 4);
    }

    #[test]
    fn closed_forms_agree_with_search_on_every_window() {
        // Exhaustive over all windows up to the full decision span.
        for len in 0..=StarWindow::DECISION_SPAN {
            for mask in 0u32..(1 << len) {
                let s: String = (0..len)
                    .map(|i| if (mask >> i) & 1 == 1 { '1' } else { '0' })
                    .collect();
                let w = window(&s);
                if let Some(stars) = closed_form_stars_needed(&w) {
                    let (search_stars, _) = minimal_plan(&w);
                    assert_eq!(
                        search_stars, stars,
                        "closed form disagrees with search for window {s:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn plan_always_reachable_within_five_rounds() {
        for len in 0..=StarWindow::DECISION_SPAN {
            for mask in 0u32..(1 << len) {
                let s: String = (0..len)
                    .map(|i| if (mask >> i) & 1 == 1 { '1' } else { '0' })
                    .collect();
                let (stars, rounds) = minimal_plan(&window(&s));
                assert!(stars <= 3, "window {s:?} wants {stars} stars");
                assert!(rounds <= 5 && rounds >= 1);
                assert!(stars <= rounds);
            }
        }
    }

    #[test]
    fn hint_after_round_appends_first() {
        // A second star this round brings the window to "11".
        assert_eq!(
            need_hint_after(&window("1"), true),
            "Need a star next round to level up"
        );
        assert_eq!(
            need_hint_after(&window(""), false),
            "Need 3 stars in the next 5 rounds to level up"
        );
    }
}
