use dream_gacha::config::DiagnosisConfig;
use dream_gacha::scoring::{FusionScorer, QuestionnaireScorer};
use dream_gacha::{
    diagnose_with_config, BirthDate, DiagnosisInput, DreamType, QuizAnswer, ScoreVector,
};

fn answer(question_id: u32, option: &str) -> QuizAnswer {
    QuizAnswer {
        question_id,
        answer_id: Some(option.to_string()),
        text_answer: None,
    }
}

fn text_answer(question_id: u32, text: &str) -> QuizAnswer {
    QuizAnswer {
        question_id,
        answer_id: None,
        text_answer: Some(text.to_string()),
    }
}

/// One option per choice question awarding points only to phoenix.
fn phoenix_answers() -> Vec<QuizAnswer> {
    vec![
        answer(1, "a"),
        answer(2, "c"),
        answer(3, "c"),
        answer(4, "c"),
        answer(5, "a"),
        answer(6, "a"),
        answer(7, "b"),
        answer(8, "a"),
        text_answer(9, "I was flying over a burning city and felt calm."),
        text_answer(10, "To open my own studio."),
    ]
}

#[test]
fn questionnaire_accumulates_option_points() {
    let result = QuestionnaireScorer::new().score(&[answer(1, "b")]);

    assert!((result.scores.deer - 1.0).abs() < 1e-6);
    assert!((result.scores.kitsune - 1.0).abs() < 1e-6);
    assert!((result.scores.phoenix - 0.0).abs() < 1e-6);
}

#[test]
fn questionnaire_ignores_unknown_references() {
    let result = QuestionnaireScorer::new().score(&[
        answer(99, "a"),
        answer(1, "z"),
        text_answer(9, "a dream about nothing"),
    ]);

    for (_, score) in result.scores.entries() {
        assert!((score - 0.0).abs() < 1e-6);
    }
}

#[test]
fn questionnaire_text_answers_do_not_score() {
    let with_text = QuestionnaireScorer::new().score(&[answer(3, "a"), text_answer(9, "x")]);
    let without_text = QuestionnaireScorer::new().score(&[answer(3, "a")]);

    assert_eq!(with_text.scores, without_text.scores);
    assert_eq!(with_text.top, without_text.top);
}

#[test]
fn questionnaire_empty_answers_resolve_deterministically() {
    let first = QuestionnaireScorer::new().score(&[]);
    let second = QuestionnaireScorer::new().score(&[]);

    for (_, score) in first.scores.entries() {
        assert!((score - 0.0).abs() < 1e-6);
    }
    assert_eq!(first.top, second.top);
}

#[test]
fn questionnaire_tie_break_is_order_independent() {
    // 1:b awards one point each to deer and kitsune, a two-way tie.
    let forward = QuestionnaireScorer::new().score(&[answer(1, "b"), text_answer(9, "first")]);
    let reversed = QuestionnaireScorer::new().score(&[text_answer(10, "second"), answer(1, "b")]);

    assert_eq!(forward.scores, reversed.scores);
    assert_eq!(forward.top, reversed.top);
}

#[test]
fn questionnaire_score_vector_is_complete_and_non_negative() {
    let result = QuestionnaireScorer::new().score(&phoenix_answers());

    let entries = result.scores.entries();
    assert_eq!(entries.len(), 9);
    for (_, score) in entries {
        assert!(score >= 0.0);
    }
}

#[test]
fn fusion_prefers_higher_weighted_combination() {
    let config = DiagnosisConfig::default();

    let mut questionnaire = ScoreVector::default();
    questionnaire.add(DreamType::Dragon, 10.0);
    questionnaire.add(DreamType::Phoenix, 8.0);

    let mut fortune = ScoreVector::default();
    fortune.add(DreamType::Phoenix, 20.0);

    let (winner, combined) = FusionScorer::new(config.fusion.clone()).fuse(&questionnaire, &fortune);

    // phoenix: 8*0.6 + 20*0.4 = 12.8, dragon: 10*0.6 = 6.0
    assert!((combined.phoenix - 12.8).abs() < 1e-6);
    assert!((combined.dragon - 6.0).abs() < 1e-6);
    assert_eq!(winner, DreamType::Phoenix);
}

#[test]
fn fusion_lets_fortune_overturn_the_questionnaire() {
    let config = DiagnosisConfig::default();

    let mut questionnaire = ScoreVector::default();
    questionnaire.add(DreamType::Dragon, 10.0);

    let mut fortune = ScoreVector::default();
    fortune.add(DreamType::Turtle, 20.0);

    let (winner, combined) = FusionScorer::new(config.fusion).fuse(&questionnaire, &fortune);

    assert!((combined.dragon - 6.0).abs() < 1e-6);
    assert!((combined.turtle - 8.0).abs() < 1e-6);
    assert_eq!(winner, DreamType::Turtle);
}

#[test]
fn fusion_ties_fall_to_the_priority_ranking() {
    let config = DiagnosisConfig::default();

    let mut questionnaire = ScoreVector::default();
    questionnaire.add(DreamType::Deer, 10.0);
    questionnaire.add(DreamType::Pegasus, 10.0);

    let fortune = ScoreVector::default();

    let (winner, _) = FusionScorer::new(config.fusion).fuse(&questionnaire, &fortune);

    // Pegasus outranks deer in the fixed priority order.
    assert_eq!(winner, DreamType::Pegasus);
}

#[test]
fn pipeline_is_deterministic() {
    let config = DiagnosisConfig::default();
    let input = DiagnosisInput {
        name: Some("Aoi".to_string()),
        birth_date: BirthDate {
            year: 1993,
            month: 5,
            day: 2,
        },
        answers: phoenix_answers(),
    };

    let first = diagnose_with_config(&input, &config);
    let second = diagnose_with_config(&input, &config);

    assert_eq!(first, second);
}

#[test]
fn end_to_end_phoenix_sweep_on_millennium_date() {
    let config = DiagnosisConfig::default();
    let input = DiagnosisInput {
        name: None,
        birth_date: BirthDate {
            year: 2000,
            month: 1,
            day: 1,
        },
        answers: phoenix_answers(),
    };

    let output = diagnose_with_config(&input, &config);

    // Eight phoenix-only options at 2 points each.
    assert!((output.questionnaire.scores.phoenix - 16.0).abs() < 1e-6);
    assert_eq!(output.questionnaire.top, DreamType::Phoenix);

    // The fused winner must match a direct 0.6/0.4 recomputation.
    let mut best = DreamType::Phoenix;
    let mut best_score = f64::NEG_INFINITY;
    for dream_type in DreamType::ALL {
        let combined = output.questionnaire.scores.get(dream_type) * 0.6
            + output.fortune.dream_type.all_scores.get(dream_type) * 0.4;
        assert!((combined - output.combined_scores.get(dream_type)).abs() < 1e-6);
        if combined > best_score {
            best = dream_type;
            best_score = combined;
        }
    }
    assert_eq!(output.dream_type, best);
    assert_eq!(output.dream_type, DreamType::Phoenix);
    assert!((output.combined_scores.phoenix - 9.6).abs() < 1e-6);
}
