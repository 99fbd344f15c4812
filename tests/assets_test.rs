//! End-to-end tests against the shipped sample artifacts in `assets/`.

use std::path::{Path, PathBuf};

use dietplan::config::PolicyKind;
use dietplan::{
    Config, DietPlanError, DietType, MacroPreference, MedicalCondition, SessionHistory,
    UserProfile,
};

fn assets_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}

fn config() -> Config {
    let mut config = Config::load(Some(&assets_dir().join("config.toml"))).unwrap();
    config.recommendation.seed = Some(42);
    config
}

#[test]
fn sample_config_loads() {
    let config = config();
    assert_eq!(config.recommendation.top_k, 3);
    assert_eq!(config.eligibility.policy, PolicyKind::Substring);
    assert_eq!(config.load_catalog().unwrap().len(), 10);
}

#[test]
fn substring_policy_eligible_sets() {
    let planner = config().build_planner().unwrap();
    assert_eq!(
        planner.eligible_meals(DietType::Vegan),
        ["Tofu Stir Fry", "Lentil Soup", "Chickpea Curry", "Quinoa Buddha Bowl"]
    );
    let vegetarian = planner.eligible_meals(DietType::Vegetarian);
    assert_eq!(vegetarian.len(), 7);
    assert!(vegetarian.iter().any(|m| m == "Cheese Omelette"));
    assert!(vegetarian.iter().any(|m| m == "Oatmeal with Almond Milk"));
    assert_eq!(planner.eligible_meals(DietType::NonVegetarian).len(), 10);
}

#[test]
fn tagged_policy_uses_ingredients() {
    let mut config = config();
    config.eligibility.policy = PolicyKind::Tagged;
    let planner = config.build_planner().unwrap();

    let vegan = planner.eligible_meals(DietType::Vegan);
    // "Milk" in the name, but the tag table knows it is almond milk
    assert!(vegan.iter().any(|m| m == "Oatmeal with Almond Milk"));
    assert_eq!(vegan.len(), 5);

    let vegetarian = planner.eligible_meals(DietType::Vegetarian);
    assert!(!vegetarian.iter().any(|m| m == "Cheese Omelette"));
    assert!(vegetarian.iter().any(|m| m == "Greek Yogurt Parfait"));
}

#[test]
fn every_profile_gets_compliant_plan() {
    let mut planner = config().build_planner().unwrap();
    let vegan_ok = planner.eligible_meals(DietType::Vegan).to_vec();
    let vegetarian_ok = planner.eligible_meals(DietType::Vegetarian).to_vec();

    for condition in MedicalCondition::ALL {
        for diet in DietType::ALL {
            for preference in MacroPreference::ALL {
                let profile = UserProfile::new(165.0, 72.0)
                    .unwrap()
                    .condition(condition)
                    .diet(diet)
                    .macro_preference(preference);
                let mut session = SessionHistory::default();
                let plan = planner.recommend(&profile, &mut session).unwrap();

                assert_eq!(plan.recommendation.len(), 3);
                let allowed = match diet {
                    DietType::Vegan => &vegan_ok,
                    DietType::Vegetarian => &vegetarian_ok,
                    DietType::NonVegetarian => continue,
                };
                for name in plan.recommendation.names() {
                    assert!(allowed.iter().any(|m| m == name), "{diet}: {name}");
                }
            }
        }
    }
}

#[test]
fn default_profile_summary() {
    let mut planner = config().build_planner().unwrap();
    let plan = planner.plan(&UserProfile::default()).unwrap();
    assert_eq!(plan.health.bmi, 22.49);
    assert_eq!(plan.health.to_string(), "BMI: 22.49 (Normal)\nGoal: Maintenance");
}

#[test]
fn missing_model_is_asset_unavailable() {
    let mut config = config();
    config.assets.model = PathBuf::from("no_such_model.json");
    let err = config.build_planner().err().unwrap();
    assert!(matches!(err, DietPlanError::AssetUnavailable { .. }));
    assert!(err.is_fatal());
}

#[test]
fn missing_labels_is_asset_unavailable() {
    let mut config = config();
    config.assets.labels = PathBuf::from("no_such_labels.json");
    let err = config.build_planner().err().unwrap();
    assert!(matches!(err, DietPlanError::AssetUnavailable { .. }));
}
