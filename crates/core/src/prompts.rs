//! Prompt templates for the text generation tools.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Build the pose insight prompt for an asana.
pub fn pose_info_prompt(pose_name: &str) -> String {
    format!(
        "\
You are a yoga expert. For the asana '{pose}', provide:

1. **Key Benefits** (3-5 bullet points, physical/mental)

2. **Step-by-Step Instructions** (3-5 bullet points, beginner-friendly)

3. **Precautions** (1-2 warnings)

Keep response concise, accurate, and safe. Use markdown.
",
        pose = pose_name.trim()
    )
}

/// Personal attributes used to build a diet plan prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DietProfile {
    /// Age in years (1-120).
    pub age: u32,
    /// Gender, free text.
    pub gender: String,
    /// Body weight in kilograms.
    pub weight_kg: f64,
    /// Height in centimetres.
    pub height_cm: f64,
    /// Goal, e.g. weight loss, muscle gain, maintenance.
    pub goal: String,
    /// Preferred diet style: vegetarian, vegan, non-vegetarian, balanced (default).
    #[serde(default = "default_diet_type")]
    pub diet_type: String,
    /// Activity level: sedentary, light, moderate (default), active.
    #[serde(default = "default_activity_level")]
    pub activity_level: String,
}

fn default_diet_type() -> String {
    "balanced".into()
}

fn default_activity_level() -> String {
    "moderate".into()
}

impl DietProfile {
    /// Validate profile values before they reach a prompt.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if:
    /// - `age` is outside 1-120
    /// - `weight_kg` or `height_cm` is not a positive finite number
    /// - `gender` or `goal` is blank
    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=120).contains(&self.age) {
            return Err(Error::InvalidInput(format!("age must be between 1 and 120, got {}", self.age)));
        }
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 {
            return Err(Error::InvalidInput("weight_kg must be a positive number".into()));
        }
        if !self.height_cm.is_finite() || self.height_cm <= 0.0 {
            return Err(Error::InvalidInput("height_cm must be a positive number".into()));
        }
        if self.gender.trim().is_empty() {
            return Err(Error::InvalidInput("gender cannot be empty".into()));
        }
        if self.goal.trim().is_empty() {
            return Err(Error::InvalidInput("goal cannot be empty".into()));
        }
        Ok(())
    }
}

/// Build the diet plan prompt for a profile.
pub fn diet_plan_prompt(profile: &DietProfile) -> String {
    format!(
        "\
You are a certified nutritionist and diet planner and your task is to create a detailed diet plan that could be repeated and that is healthy.

Create a personalized healthy plan with the following details:

Person:
- Age: {age} years
- Gender: {gender}
- Weight: {weight} kg
- Height: {height} cm
- Activity level: {activity}
- Goal: {goal} (e.g., weight loss, muscle gain, maintenance)
- Preferred diet style: {diet} (e.g., vegetarian, vegan, non-vegetarian, balanced)

Instructions:
1. For each day, list:
   - Breakfast
   - Lunch
   - Evening snack
   - Dinner

2. Keep meals realistic for an Indian context when possible, using commonly available foods that are healthy and balanced, and vary the meals from day to day.

3. For each meal, give:
   - Description of the dish
   - Very rough calorie estimate (only if confident)
   - The types of food it includes

4. Add a short **Daily Notes** section for each day with:
   - Water intake guideline
   - Simple lifestyle tip.

5. Safety:
   - Do NOT give medical advice or claim to cure diseases.
   - If data is insufficient, add a short disclaimer at the end.

Format the response clearly using markdown headings and bullet points.
",
        age = profile.age,
        gender = profile.gender.trim(),
        weight = profile.weight_kg,
        height = profile.height_cm,
        activity = profile.activity_level.trim(),
        goal = profile.goal.trim(),
        diet = profile.diet_type.trim(),
    )
}
