use likert_core::models::answer::{Answer, AnswerSet};
use likert_core::models::question::{Question, QuestionKind, QuestionOption};
use likert_core::models::visibility::{
    Combinator, ControllingCondition, MatchMode, VisibilityRule,
};
use likert_engine::error::{ConfigurationError, EngineError};
use likert_engine::visibility;

fn question(code: &str, position: u32, option_codes: &[&str]) -> Question {
    Question {
        code: code.to_string(),
        kind: QuestionKind::Radio,
        position,
        content: format!("question {code}"),
        options: option_codes
            .iter()
            .map(|c| QuestionOption {
                code: c.to_string(),
                content: c.to_string(),
                score: None,
            })
            .collect(),
        visibility: None,
    }
}

fn controlled(
    code: &str,
    position: u32,
    combinator: Combinator,
    conditions: Vec<ControllingCondition>,
) -> Question {
    let mut q = question(code, position, &[]);
    q.visibility = Some(VisibilityRule {
        combinator,
        conditions,
    });
    q
}

fn condition(controller: &str, match_mode: MatchMode, codes: &[&str]) -> ControllingCondition {
    ControllingCondition {
        question_code: controller.to_string(),
        match_mode,
        option_codes: codes.iter().map(|c| c.to_string()).collect(),
    }
}

#[test]
fn question_without_rule_is_always_visible() {
    let questions = vec![question("q1", 0, &["o1"])];

    let no_answers = AnswerSet::new();
    let visible = visibility::evaluate(&questions, &no_answers).unwrap();
    assert!(visible.contains("q1"));

    let mut answers = AnswerSet::new();
    answers.insert("q1", Answer::select(["o1"]));
    let visible = visibility::evaluate(&questions, &answers).unwrap();
    assert!(visible.contains("q1"));
}

#[test]
fn any_condition_shows_on_matching_selection() {
    let questions = vec![
        question("q1", 0, &["o1", "o2"]),
        controlled(
            "q2",
            1,
            Combinator::Any,
            vec![condition("q1", MatchMode::Any, &["o1"])],
        ),
    ];

    let mut answers = AnswerSet::new();
    answers.insert("q1", Answer::select(["o1"]));
    let visible = visibility::evaluate(&questions, &answers).unwrap();
    assert!(visible.contains("q2"));

    let mut answers = AnswerSet::new();
    answers.insert("q1", Answer::select(["o2"]));
    let visible = visibility::evaluate(&questions, &answers).unwrap();
    assert!(!visible.contains("q2"));
}

#[test]
fn all_condition_requires_every_listed_code() {
    let questions = vec![
        question("q1", 0, &["o1", "o2", "o3"]),
        controlled(
            "q2",
            1,
            Combinator::All,
            vec![condition("q1", MatchMode::All, &["o1", "o2"])],
        ),
    ];

    let mut answers = AnswerSet::new();
    answers.insert("q1", Answer::select(["o1", "o2", "o3"]));
    let visible = visibility::evaluate(&questions, &answers).unwrap();
    assert!(visible.contains("q2"));

    let mut answers = AnswerSet::new();
    answers.insert("q1", Answer::select(["o1"]));
    let visible = visibility::evaluate(&questions, &answers).unwrap();
    assert!(!visible.contains("q2"));
}

#[test]
fn combinator_any_is_or_over_conditions() {
    let questions = vec![
        question("q1", 0, &["o1"]),
        question("q2", 1, &["p1"]),
        controlled(
            "q3",
            2,
            Combinator::Any,
            vec![
                condition("q1", MatchMode::Any, &["o1"]),
                condition("q2", MatchMode::Any, &["p1"]),
            ],
        ),
    ];

    let mut answers = AnswerSet::new();
    answers.insert("q2", Answer::select(["p1"]));
    let visible = visibility::evaluate(&questions, &answers).unwrap();
    assert!(visible.contains("q3"));
}

#[test]
fn combinator_all_is_and_over_conditions() {
    let questions = vec![
        question("q1", 0, &["o1"]),
        question("q2", 1, &["p1"]),
        controlled(
            "q3",
            2,
            Combinator::All,
            vec![
                condition("q1", MatchMode::Any, &["o1"]),
                condition("q2", MatchMode::Any, &["p1"]),
            ],
        ),
    ];

    let mut answers = AnswerSet::new();
    answers.insert("q1", Answer::select(["o1"]));
    let visible = visibility::evaluate(&questions, &answers).unwrap();
    assert!(!visible.contains("q3"));

    answers.insert("q2", Answer::select(["p1"]));
    let visible = visibility::evaluate(&questions, &answers).unwrap();
    assert!(visible.contains("q3"));
}

/// A hidden controller contributes an empty selection set, so everything
/// downstream of it collapses too.
#[test]
fn hidden_controller_hides_its_dependents() {
    let questions = vec![
        question("q1", 0, &["o1", "o2"]),
        controlled(
            "q2",
            1,
            Combinator::Any,
            vec![condition("q1", MatchMode::Any, &["o1"])],
        ),
        controlled(
            "q3",
            2,
            Combinator::Any,
            vec![condition("q2", MatchMode::Any, &["p1"])],
        ),
    ];

    // q2's answer was recorded before q1 changed; q2 is now hidden, so its
    // stored selection must not leak into q3's condition.
    let mut answers = AnswerSet::new();
    answers.insert("q1", Answer::select(["o2"]));
    answers.insert("q2", Answer::select(["p1"]));

    let visible = visibility::evaluate(&questions, &answers).unwrap();
    assert!(!visible.contains("q2"));
    assert!(!visible.contains("q3"));
}

#[test]
fn unknown_controller_is_a_configuration_error() {
    let questions = vec![controlled(
        "q1",
        0,
        Combinator::Any,
        vec![condition("q9", MatchMode::Any, &["o1"])],
    )];

    let err = visibility::evaluate(&questions, &AnswerSet::new()).unwrap_err();
    match err {
        EngineError::Configuration(ConfigurationError::UnknownController {
            question_code,
            controller_code,
        }) => {
            assert_eq!(question_code, "q1");
            assert_eq!(controller_code, "q9");
        }
        other => panic!("expected UnknownController, got {other:?}"),
    }
}

#[test]
fn later_positioned_controller_is_a_configuration_error() {
    let questions = vec![
        controlled(
            "q1",
            0,
            Combinator::Any,
            vec![condition("q2", MatchMode::Any, &["o1"])],
        ),
        question("q2", 1, &["o1"]),
    ];

    let err = visibility::evaluate(&questions, &AnswerSet::new()).unwrap_err();
    match err {
        EngineError::Configuration(ConfigurationError::ControllerNotBefore {
            question_code,
            controller_code,
        }) => {
            assert_eq!(question_code, "q1");
            assert_eq!(controller_code, "q2");
        }
        other => panic!("expected ControllerNotBefore, got {other:?}"),
    }
}

#[test]
fn questions_are_swept_by_position_not_declaration_order() {
    // Declared out of order; the sweep must still see q1 before q2.
    let questions = vec![
        controlled(
            "q2",
            1,
            Combinator::Any,
            vec![condition("q1", MatchMode::Any, &["o1"])],
        ),
        question("q1", 0, &["o1"]),
    ];

    let mut answers = AnswerSet::new();
    answers.insert("q1", Answer::select(["o1"]));
    let visible = visibility::evaluate(&questions, &answers).unwrap();
    assert!(visible.contains("q2"));
}
