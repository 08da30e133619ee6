use lingo_engine::{
    CombatActionInput, CombatError, CombatRequest, ItemClass, Rating, TurnType,
    resolve, resolve_request,
};

fn request(json: &str) -> CombatRequest {
    serde_json::from_str(json).expect("request json")
}

#[test]
fn request_parses_string_enums() {
    let req = request(
        r#"{
            "turn_type": "defense",
            "item_class": "Special",
            "raw_score": 91.5,
            "rating": "NeedsImprovement",
            "complexity": 4,
            "card_revealed": false,
            "base_value": 15
        }"#,
    );
    let input = CombatActionInput::try_from(req).unwrap();
    assert_eq!(input.turn_type, TurnType::Defense);
    assert_eq!(input.item_class, ItemClass::Special);
    assert_eq!(input.assessment.rating, Rating::NeedsImprovement);
    assert_eq!(input.complexity, 4);
}

#[test]
fn item_class_and_reveal_default() {
    let req = request(
        r#"{ "turn_type": "attack", "raw_score": 70, "rating": "okay", "complexity": 3, "base_value": 40 }"#,
    );
    let input = CombatActionInput::try_from(req.clone()).unwrap();
    assert_eq!(input.item_class, ItemClass::Regular);
    assert!(!input.card_revealed);
    assert_eq!(resolve_request(req).unwrap().final_damage, 56.0);
}

#[test]
fn rating_spellings_are_accepted() {
    for s in ["needs improvement", "needs_improvement", "NEEDS-IMPROVEMENT", " NeedsImprovement "] {
        assert_eq!(s.parse::<Rating>().unwrap(), Rating::NeedsImprovement);
    }
    assert_eq!("defence".parse::<TurnType>().unwrap(), TurnType::Defense);
}

#[test]
fn unknown_rating_is_invalid_rating() {
    let req = request(
        r#"{ "turn_type": "attack", "raw_score": 70, "rating": "great", "complexity": 3, "base_value": 40 }"#,
    );
    assert_eq!(
        resolve_request(req),
        Err(CombatError::InvalidRating("great".into()))
    );
}

#[test]
fn unknown_turn_and_item_class_are_rejected() {
    let req = request(
        r#"{ "turn_type": "heal", "raw_score": 70, "rating": "okay", "complexity": 3, "base_value": 40 }"#,
    );
    assert_eq!(
        resolve_request(req),
        Err(CombatError::InvalidTurnType("heal".into()))
    );

    let req = request(
        r#"{ "turn_type": "attack", "item_class": "legendary", "raw_score": 70, "rating": "okay", "complexity": 3, "base_value": 40 }"#,
    );
    assert_eq!(
        resolve_request(req),
        Err(CombatError::InvalidItemClass("legendary".into()))
    );
}

#[test]
fn complexity_outside_u8_keeps_original_value() {
    for level in [-1i64, 300] {
        let req = CombatRequest {
            turn_type: "attack".into(),
            item_class: "regular".into(),
            raw_score: 70.0,
            rating: "good".into(),
            complexity: level,
            card_revealed: false,
            base_value: 40.0,
        };
        assert_eq!(
            resolve_request(req),
            Err(CombatError::InvalidComplexity(level))
        );
    }
}

#[test]
fn negative_base_value_is_rejected() {
    let req = request(
        r#"{ "turn_type": "defense", "raw_score": 70, "rating": "okay", "complexity": 3, "base_value": -15 }"#,
    );
    assert_eq!(
        resolve_request(req),
        Err(CombatError::InvalidBaseValue(-15.0))
    );
}

#[test]
fn typed_input_round_trips_through_json() {
    let json = r#"{
        "turn_type": "attack",
        "item_class": "regular",
        "assessment": { "raw_score": 88.0, "rating": "good" },
        "complexity": 2,
        "card_revealed": true,
        "base_value": 40.0
    }"#;
    let input: CombatActionInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.assessment.rating, Rating::Good);
    assert!(input.card_revealed);
}

fn typed_input_with_complexity(level: &str) -> String {
    format!(
        r#"{{ "turn_type": "attack", "assessment": {{ "raw_score": 80, "rating": "good" }}, "complexity": {}, "base_value": 40 }}"#,
        level
    )
}

#[test]
fn typed_input_reports_oversized_complexity_as_invalid_complexity() {
    for level in ["300", "-1"] {
        let err = serde_json::from_str::<CombatActionInput>(&typed_input_with_complexity(level))
            .unwrap_err();
        let expected = format!("complexity level {} is outside 1..=5", level);
        assert!(err.to_string().contains(&expected), "{}", err);
    }
}

#[test]
fn typed_input_defers_in_range_complexity_to_resolution() {
    let input: CombatActionInput =
        serde_json::from_str(&typed_input_with_complexity("7")).unwrap();
    assert_eq!(input.complexity, 7);
    assert_eq!(resolve(input), Err(CombatError::InvalidComplexity(7)));

    let input: CombatActionInput =
        serde_json::from_str(&typed_input_with_complexity("3")).unwrap();
    assert_eq!(resolve(input).unwrap().complexity_bonus, 0.3);
}
