//! Static structure validation of candidate programs.
//!
//! Uses the Python front end to inspect the candidate without ever running
//! it. Catching a wrong entry-point name or a missing method here saves a
//! whole process spawn, and bounds the executor's failure surface to
//! well-formed but behaviorally wrong programs.

use gamewright_domain::ValidationOutcome;
use rustpython_parser::{ast, Parse};

/// Check that `source` parses and declares `class Game` with a `play` method.
///
/// The check is purely structural:
/// 1. a parse failure is rejected with the parser's message and line;
/// 2. a top-level class literally named `Game` must exist;
/// 3. its body must contain a method literally named `play`.
pub fn validate_structure(source: &str) -> ValidationOutcome {
    let suite = match ast::Suite::parse(source, "<game>") {
        Ok(suite) => suite,
        Err(err) => {
            let offset = (u32::from(err.offset) as usize).min(source.len());
            let line = source[..offset].bytes().filter(|b| *b == b'\n').count() + 1;
            return ValidationOutcome::rejected(format!(
                "syntax error: {} at line {}",
                err.error, line
            ));
        }
    };

    let game_class = suite.iter().find_map(|stmt| match stmt {
        ast::Stmt::ClassDef(class) if class.name.as_str() == "Game" => Some(class),
        _ => None,
    });

    let Some(game_class) = game_class else {
        return ValidationOutcome::rejected("no 'Game' type found");
    };

    let has_play = game_class.body.iter().any(|stmt| match stmt {
        ast::Stmt::FunctionDef(def) => def.name.as_str() == "play",
        ast::Stmt::AsyncFunctionDef(def) => def.name.as_str() == "play",
        _ => false,
    });

    if has_play {
        ValidationOutcome::valid()
    } else {
        ValidationOutcome::rejected("no 'play' method found in Game")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_structure() {
        let code = "class Game:\n  def __init__(self): pass\n  def play(self): print(1)";
        let outcome = validate_structure(code);
        assert!(outcome.is_valid);
        assert_eq!(outcome.reason, "valid");
    }

    #[test]
    fn test_missing_game_class() {
        let outcome = validate_structure("def play(): pass");
        assert!(!outcome.is_valid);
        assert_eq!(outcome.reason, "no 'Game' type found");
    }

    #[test]
    fn test_wrong_class_name() {
        let outcome = validate_structure("class Simulation:\n  def play(self): pass");
        assert!(!outcome.is_valid);
        assert_eq!(outcome.reason, "no 'Game' type found");
    }

    #[test]
    fn test_missing_play_method() {
        let outcome = validate_structure("class Game:\n  def __init__(self): pass");
        assert!(!outcome.is_valid);
        assert_eq!(outcome.reason, "no 'play' method found in Game");
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let outcome = validate_structure("class Game:\n  def play(self): print('unterminated");
        assert!(!outcome.is_valid);
        assert!(outcome.reason.starts_with("syntax error:"), "{}", outcome.reason);
        assert!(outcome.reason.contains("at line"), "{}", outcome.reason);
    }

    #[test]
    fn test_async_play_accepted() {
        let code = "class Game:\n  async def play(self): pass";
        assert!(validate_structure(code).is_valid);
    }

    #[test]
    fn test_nested_game_class_is_not_top_level() {
        let code = "def factory():\n  class Game:\n    def play(self): pass";
        let outcome = validate_structure(code);
        assert!(!outcome.is_valid);
        assert_eq!(outcome.reason, "no 'Game' type found");
    }

    #[test]
    fn test_empty_source_has_no_game() {
        let outcome = validate_structure("");
        assert!(!outcome.is_valid);
        assert_eq!(outcome.reason, "no 'Game' type found");
    }
}
