//! Mood, genre and remix suggestions from clip features

use super::AudioFeatures;
use serde::{Deserialize, Serialize};

/// Remix parameters a suggestion proposes
///
/// Only the fields a suggestion sets are serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestionParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch_shift: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmony_type: Option<String>,
}

/// A named remix idea
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeSuggestion {
    pub name: String,
    pub description: String,
    pub params: SuggestionParams,
}

/// Everything `suggest` proposes for a clip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestions {
    pub suggested_moods: Vec<String>,
    pub suggested_genres: Vec<String>,
    pub creative_suggestions: Vec<CreativeSuggestion>,
}

impl Suggestions {
    /// Look up a creative suggestion by name, ignoring case
    pub fn find(&self, name: &str) -> Option<&CreativeSuggestion> {
        self.creative_suggestions
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}

fn idea(name: &str, description: &str, params: SuggestionParams) -> CreativeSuggestion {
    CreativeSuggestion {
        name: name.to_string(),
        description: description.to_string(),
        params,
    }
}

/// The fixed remix ideas offered for every clip
pub fn creative_suggestions() -> Vec<CreativeSuggestion> {
    vec![
        idea(
            "Energize",
            "Speed up and brighten the track",
            SuggestionParams {
                tempo_change: Some(1.2),
                pitch_shift: Some(2),
                mood: Some("energetic".to_string()),
                ..Default::default()
            },
        ),
        idea(
            "Chill Out",
            "Slow down and add ambient effects",
            SuggestionParams {
                tempo_change: Some(0.8),
                mood: Some("calm".to_string()),
                genre: Some("ambient".to_string()),
                ..Default::default()
            },
        ),
        idea(
            "Add Harmony",
            "Layer harmonic vocals or instruments",
            SuggestionParams {
                harmony_type: Some("third".to_string()),
                ..Default::default()
            },
        ),
        idea(
            "Dark Remix",
            "Transform into a darker, moodier version",
            SuggestionParams {
                mood: Some("dark".to_string()),
                pitch_shift: Some(-2),
                ..Default::default()
            },
        ),
    ]
}

/// Suggest moods, genres and remixes for a clip's features
pub fn suggest(features: &AudioFeatures) -> Suggestions {
    let mut moods = Vec::new();
    if features.energy > 0.6 {
        moods.push("energetic");
    } else if features.energy < 0.3 {
        moods.push("calm");
    }
    if features.brightness < 0.3 {
        moods.push("dark");
    } else if features.brightness > 0.5 {
        moods.push("uplifting");
    }

    let genres = if features.energy > 0.7 {
        ["rock", "electronic"]
    } else {
        ["ambient", "classical"]
    };

    Suggestions {
        suggested_moods: moods.into_iter().map(String::from).collect(),
        suggested_genres: genres.into_iter().map(String::from).collect(),
        creative_suggestions: creative_suggestions(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn features(energy: f64, brightness: f64) -> AudioFeatures {
        AudioFeatures {
            energy,
            brightness,
            dynamic_range: 2.0,
        }
    }

    #[test]
    fn test_loud_dark_clip() {
        let s = suggest(&features(0.8, 0.05));
        assert_eq!(s.suggested_moods, vec!["energetic", "dark"]);
        assert_eq!(s.suggested_genres, vec!["rock", "electronic"]);
    }

    #[test]
    fn test_quiet_bright_clip() {
        let s = suggest(&features(0.2, 0.6));
        assert_eq!(s.suggested_moods, vec!["calm", "uplifting"]);
        assert_eq!(s.suggested_genres, vec!["ambient", "classical"]);
    }

    #[test]
    fn test_middle_of_the_road() {
        let s = suggest(&features(0.65, 0.4));
        assert_eq!(s.suggested_moods, vec!["energetic"]);
        // 0.65 is energetic but not loud enough for rock
        assert_eq!(s.suggested_genres, vec!["ambient", "classical"]);
    }

    #[test_case(0.61, true ; "just above the energetic line")]
    #[test_case(0.6, false ; "on the energetic line")]
    #[test_case(0.3, false ; "on the calm line")]
    fn test_energetic_threshold(energy: f64, energetic: bool) {
        let s = suggest(&features(energy, 0.4));
        assert_eq!(s.suggested_moods.contains(&"energetic".to_string()), energetic);
    }

    #[test]
    fn test_creative_suggestions() {
        let s = suggest(&AudioFeatures::default());
        assert_eq!(s.creative_suggestions.len(), 4);

        let energize = s.find("energize").unwrap();
        assert_eq!(energize.params.tempo_change, Some(1.2));
        assert_eq!(energize.params.pitch_shift, Some(2));

        let dark = s.find("Dark Remix").unwrap();
        assert_eq!(dark.params.mood.as_deref(), Some("dark"));
        assert!(s.find("Louder").is_none());
    }

    #[test]
    fn test_unset_params_are_not_serialized() {
        let harmony = &creative_suggestions()[2];
        let json = serde_json::to_value(&harmony.params).unwrap();
        assert_eq!(json, serde_json::json!({ "harmony_type": "third" }));
    }
}
