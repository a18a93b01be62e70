use dream_gacha::config::FortunePoints;
use dream_gacha::fortune::{
    day_number, day_stem, four_pillars, life_path_number, life_path_profile, star_for,
    FortuneEngine, HEAVENLY_STEMS,
};
use dream_gacha::{BirthDate, DreamType, Element};

fn date(year: i32, month: u32, day: u32) -> BirthDate {
    BirthDate { year, month, day }
}

#[test]
fn day_numbers_are_consecutive() {
    let base = day_number(1900, 1, 1);
    assert_eq!(day_number(1900, 1, 2), base + 1);
    // 2000 is a leap year; 1900 is not.
    assert_eq!(day_number(2000, 3, 1) - day_number(2000, 2, 28), 2);
    assert_eq!(day_number(1900, 3, 1) - day_number(1900, 2, 28), 1);
}

#[test]
fn stem_cycle_anchor_is_index_zero() {
    let stem = day_stem(&date(1900, 1, 1));
    assert_eq!(stem.glyph, HEAVENLY_STEMS[0].glyph);
    assert_eq!(stem.glyph, "甲");
    assert_eq!(stem.element, Element::Wood);
}

#[test]
fn stem_repeats_every_ten_days() {
    let first = day_stem(&date(2000, 1, 1));
    let second = day_stem(&date(2000, 1, 11));
    assert_eq!(first, second);
}

#[test]
fn stems_before_the_anchor_normalize() {
    // One day before the anchor lands on the last stem of the cycle.
    let stem = day_stem(&date(1899, 12, 31));
    assert_eq!(stem.glyph, "癸");
}

#[test]
fn millennium_day_pillar_is_wuwu() {
    let pillars = four_pillars(&date(2000, 1, 1));
    assert_eq!(pillars.day_pillar, "戊午");
    assert_eq!(pillars.year_pillar, "庚辰");
    assert_eq!(pillars.month_pillar, "戊寅");
}

#[test]
fn jiazi_year_opens_the_cycle() {
    let pillars = four_pillars(&date(1984, 6, 15));
    assert!(pillars.year_pillar.starts_with("甲子"));
}

#[test]
fn element_balance_counts_six_components() {
    for birth in [
        date(2000, 1, 1),
        date(1984, 6, 15),
        date(1899, 12, 31),
        date(2024, 2, 29),
    ] {
        let pillars = four_pillars(&birth);
        assert_eq!(pillars.element_balance.total(), 6);
    }
}

#[test]
fn millennium_balance_is_earth_dominant() {
    let pillars = four_pillars(&date(2000, 1, 1));
    assert_eq!(pillars.element_balance.earth, 3);
    assert_eq!(pillars.element_balance.wood, 1);
    assert_eq!(pillars.element_balance.fire, 1);
    assert_eq!(pillars.element_balance.metal, 1);
    assert_eq!(pillars.element_balance.water, 0);
    assert_eq!(pillars.element_balance.dominant(), Element::Earth);
}

#[test]
fn nine_star_reduces_the_year() {
    // 2000 → 2 → 11 - 2 = Nine Purple.
    assert_eq!(star_for(2000, 6).number, 9);
    // 1984 → 22 → 4 → Seven Red.
    assert_eq!(star_for(1984, 6).number, 7);
    // 1990 → 19 → 10 → 1 → 11 - 1 wraps to One White.
    assert_eq!(star_for(1990, 6).number, 1);
}

#[test]
fn nine_star_january_belongs_to_previous_year() {
    assert_eq!(star_for(2000, 1).number, star_for(1999, 6).number);
    assert_eq!(star_for(2000, 2).number, star_for(2000, 6).number);
    assert_ne!(star_for(2000, 1).number, star_for(2000, 2).number);
}

#[test]
fn life_path_reduces_to_a_single_digit() {
    assert_eq!(life_path_number(&date(2000, 1, 1)), 4);
    assert_eq!(life_path_number(&date(1990, 12, 12)), 7);
}

#[test]
fn life_path_master_numbers_stop_the_reduction() {
    // 1+9+9+3+5+2 = 29 → 11, kept.
    assert_eq!(life_path_number(&date(1993, 5, 2)), 11);
    // 2+0+0+0+9+2+9 = 22, kept immediately.
    assert_eq!(life_path_number(&date(2000, 9, 29)), 22);
    // 1+9+9+9+3+2 = 33, kept immediately.
    assert_eq!(life_path_number(&date(1999, 3, 2)), 33);
}

#[test]
fn life_path_catalog_covers_all_outcomes() {
    for number in [1, 2, 3, 4, 5, 6, 7, 8, 9, 11, 22, 33] {
        assert_eq!(life_path_profile(number).number, number);
    }
}

#[test]
fn engine_is_idempotent() {
    let engine = FortuneEngine::new(FortunePoints::default());
    let first = engine.diagnose(&date(1993, 5, 2));
    let second = engine.diagnose(&date(1993, 5, 2));
    assert_eq!(first, second);
}

#[test]
fn engine_scores_millennium_date() {
    let engine = FortuneEngine::new(FortunePoints::default());
    let result = engine.diagnose(&date(2000, 1, 1));

    // Earth dominates the balance and the day stem is also earth, so both
    // earth types collect 5; turtle adds the life-path award on top.
    assert!((result.dream_type.all_scores.turtle - 7.0).abs() < 1e-6);
    assert!((result.dream_type.all_scores.elephant - 5.0).abs() < 1e-6);
    assert!((result.dream_type.all_scores.shark - 2.0).abs() < 1e-6);
    assert!((result.dream_type.all_scores.phoenix - 0.0).abs() < 1e-6);

    assert_eq!(result.dream_type.primary, DreamType::Turtle);
    assert_eq!(result.dream_type.secondary, DreamType::Elephant);

    assert_eq!(result.kyusei.number, 1);
    assert_eq!(result.numerology.number, 4);
}

#[test]
fn engine_score_vectors_are_complete() {
    let engine = FortuneEngine::new(FortunePoints::default());
    for birth in [date(2000, 1, 1), date(1970, 8, 30), date(1899, 2, 3)] {
        let result = engine.diagnose(&birth);
        let entries = result.dream_type.all_scores.entries();
        assert_eq!(entries.len(), 9);
        for (_, score) in entries {
            assert!(score >= 0.0);
        }
    }
}
