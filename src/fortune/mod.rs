pub mod engine;
pub mod kyusei;
pub mod numerology;
pub mod pillars;
pub mod stem;

pub use engine::{life_path_dream_type, FortuneDiagnosis, FortuneDreamType, FortuneEngine};
pub use kyusei::{star_for, NineStar, NINE_STARS};
pub use numerology::{life_path_number, life_path_profile, LifePath, LIFE_PATHS};
pub use pillars::{four_pillars, EarthlyBranch, ElementBalance, FourPillars, EARTHLY_BRANCHES};
pub use stem::{
    day_number, day_stem, day_stem_index, days_since_epoch, HeavenlyStem, Polarity, HEAVENLY_STEMS,
};
