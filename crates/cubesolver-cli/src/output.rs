//! Text and JSON rendering for command results.

use serde::Serialize;

use cubesolver_lib::{format_sequence, CubeState, Face, Move, Solution, SolutionSource};

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Serialize)]
struct SolutionView<'a> {
    solution: &'a [Move],
    moves: usize,
    source: SolutionSource,
}

#[derive(Serialize)]
struct ScrambleView<'a> {
    scramble: &'a [Move],
}

/// Render a solve result.
///
/// Text output is the move sequence on one line; an already solved cube
/// renders as an empty line.
pub fn render_solution(solution: &Solution, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_sequence(&solution.moves),
        OutputFormat::Json => to_json(&SolutionView {
            solution: &solution.moves,
            moves: solution.move_count(),
            source: solution.source,
        }),
    }
}

/// Render a scramble.
pub fn render_scramble(scramble: &[Move], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_sequence(scramble),
        OutputFormat::Json => to_json(&ScrambleView { scramble }),
    }
}

/// Render a cube state, one face per line in text mode.
pub fn render_state(state: &CubeState, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => Face::ALL
            .iter()
            .map(|face| {
                let stickers = state.face(*face).unwrap_or_default();
                format!("{}: {}", face, stickers.join(" "))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => to_json(state),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    // Serializing these views cannot fail: every key is a string.
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubesolver_lib::sample_state;

    fn solution(tokens: &str, source: SolutionSource) -> Solution {
        Solution {
            moves: Move::parse_sequence(tokens).unwrap(),
            source,
        }
    }

    #[test]
    fn text_solution_is_one_line() {
        let rendered = render_solution(
            &solution("R U R' U'", SolutionSource::External),
            OutputFormat::Text,
        );
        assert_eq!(rendered, "R U R' U'");
    }

    #[test]
    fn json_solution_carries_source() {
        let rendered = render_solution(
            &solution("F2 B", SolutionSource::RandomFallback),
            OutputFormat::Json,
        );
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["solution"], serde_json::json!(["F2", "B"]));
        assert_eq!(value["moves"], 2);
        assert_eq!(value["source"], "random_fallback");
    }

    #[test]
    fn already_solved_renders_empty() {
        let rendered = render_solution(&Solution::already_solved(), OutputFormat::Text);
        assert!(rendered.is_empty());
    }

    #[test]
    fn text_state_lists_faces_in_order() {
        let rendered = render_state(&sample_state(), OutputFormat::Text);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "U: W R W G W B W O W");
        assert!(lines[1].starts_with("R: "));
        assert!(lines[5].starts_with("B: "));
    }

    #[test]
    fn json_state_parses_back() {
        let rendered = render_state(&sample_state(), OutputFormat::Json);
        let state: CubeState = serde_json::from_str(&rendered).unwrap();
        assert_eq!(state, sample_state());
    }
}
