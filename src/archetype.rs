use serde::{Deserialize, Serialize};

use crate::keystroke::Keystroke;
use crate::metrics::MetricsSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum_macros::Display)]
pub enum ArchetypeKind {
    #[strum(to_string = "The Rushing Wind")]
    RushingWind,
    #[strum(to_string = "The Musical Soul")]
    MusicalSoul,
    #[strum(to_string = "The Precision Arrow")]
    PrecisionArrow,
    #[strum(to_string = "The Careful Architect")]
    CarefulArchitect,
    #[strum(to_string = "The Balanced Flow")]
    BalancedFlow,
    #[strum(to_string = "The Creative Storm")]
    CreativeStorm,
    #[strum(to_string = "The Thoughtful Wanderer")]
    ThoughtfulWanderer,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Archetype {
    pub kind: ArchetypeKind,
    pub name: &'static str,
    pub symbol: &'static str,
    pub description: &'static str,
    pub traits: [&'static str; 4],
    pub reading: &'static str,
}

pub static CATALOG: [Archetype; 7] = [
    Archetype {
        kind: ArchetypeKind::RushingWind,
        name: "The Rushing Wind",
        symbol: "🌪️",
        description: "You move through life with speed and momentum, but sometimes miss the details along the way.",
        traits: ["Impulsive", "Energetic", "Action-oriented", "Risk-taker"],
        reading: "You don't stop to smell the roses; you're too busy creating storms. Your fast pace and occasional stumbles reveal someone who values momentum over perfection. You'd rather try and fail than wait and wonder. This energy serves you well in dynamic environments, but remember: even the wind needs to rest.",
    },
    Archetype {
        kind: ArchetypeKind::MusicalSoul,
        name: "The Musical Soul",
        symbol: "🎵",
        description: "Your typing flows like a melody, steady and harmonious.",
        traits: ["Thoughtful", "Artistic", "Patient", "Harmonious"],
        reading: "Your rhythm reveals a musical soul. You don't rush, you flow. Each keystroke is like a note in a composition, carefully placed and perfectly timed. This suggests someone who appreciates beauty, art, and the spaces between actions. You're likely drawn to music, poetry, or any form where timing and rhythm matter.",
    },
    Archetype {
        kind: ArchetypeKind::PrecisionArrow,
        name: "The Precision Arrow",
        symbol: "🎯",
        description: "Swift and accurate, you hit your targets with remarkable consistency.",
        traits: ["Focused", "Efficient", "Competent", "Goal-oriented"],
        reading: "You're a force of precision. Fast and accurate, you move through tasks like a well-aimed arrow. This combination suggests someone who has mastered their craft through practice and maintains high standards. You value both speed and quality, a rare and powerful combination.",
    },
    Archetype {
        kind: ArchetypeKind::CarefulArchitect,
        name: "The Careful Architect",
        symbol: "🏛️",
        description: "You build your thoughts carefully, ensuring every detail is perfect.",
        traits: ["Meticulous", "Deliberate", "Quality-focused", "Methodical"],
        reading: "You are the careful architect of your words. Slow and precise, you build each sentence with intention. This reveals someone who values quality over quantity, who thinks before they act, and who creates lasting structures rather than temporary ones. Your patience is your strength.",
    },
    Archetype {
        kind: ArchetypeKind::BalancedFlow,
        name: "The Balanced Flow",
        symbol: "🌊",
        description: "You move through life with steady, consistent rhythm.",
        traits: ["Balanced", "Consistent", "Reliable", "Centered"],
        reading: "You embody balance. Your moderate pace and consistent rhythm suggest someone who has found their flow. You're not too fast, not too slow, just right. This indicates a person who has learned to pace themselves, who understands the value of steady progress over bursts of energy.",
    },
    Archetype {
        kind: ArchetypeKind::CreativeStorm,
        name: "The Creative Storm",
        symbol: "⚡",
        description: "Your typing pattern is unpredictable, like bursts of creative energy.",
        traits: ["Creative", "Unpredictable", "Spontaneous", "Innovative"],
        reading: "Your irregular rhythm reveals a creative storm within. You don't follow predictable patterns; you create your own. This suggests someone who thinks outside the box, who values spontaneity, and who brings fresh perspectives to everything they do. Your unpredictability is your superpower.",
    },
    Archetype {
        kind: ArchetypeKind::ThoughtfulWanderer,
        name: "The Thoughtful Wanderer",
        symbol: "🧭",
        description: "You move at your own pace, exploring thoughts and ideas as they come.",
        traits: ["Contemplative", "Curious", "Adaptable", "Open-minded"],
        reading: "You are the thoughtful wanderer. Your typing pattern doesn't fit into neat categories, and that's beautiful. You move through ideas at your own pace, exploring and adapting. This suggests someone who is open to new experiences, who doesn't rush to conclusions, and who values the journey as much as the destination.",
    },
];

impl ArchetypeKind {
    pub fn archetype(self) -> &'static Archetype {
        let idx = match self {
            ArchetypeKind::RushingWind => 0,
            ArchetypeKind::MusicalSoul => 1,
            ArchetypeKind::PrecisionArrow => 2,
            ArchetypeKind::CarefulArchitect => 3,
            ArchetypeKind::BalancedFlow => 4,
            ArchetypeKind::CreativeStorm => 5,
            ArchetypeKind::ThoughtfulWanderer => 6,
        };
        &CATALOG[idx]
    }
}

/// Cut-off points for the classification rules. Speeds in WPM, accuracy and
/// typo rate in percent, rhythm in ms of standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub fast_wpm: f64,
    pub slow_wpm: f64,
    pub high_accuracy: f64,
    pub high_typo_rate: f64,
    pub low_variance: f64,
    pub high_variance: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            fast_wpm: 60.0,
            slow_wpm: 30.0,
            high_accuracy: 95.0,
            high_typo_rate: 20.0,
            low_variance: 150.0,
            high_variance: 400.0,
        }
    }
}

/// Picks the archetype for a metrics snapshot. First matching rule wins and
/// spam always wins.
pub fn classify(metrics: &MetricsSnapshot, t: &Thresholds) -> ArchetypeKind {
    let fast = metrics.wpm >= t.fast_wpm;
    let slow = metrics.wpm < t.slow_wpm;
    let moderate = !fast && !slow;
    let accurate = metrics.accuracy >= t.high_accuracy && metrics.typo_rate < t.high_typo_rate;
    let rhythmic = metrics.rhythm_variance < t.low_variance;
    let irregular = metrics.rhythm_variance > t.high_variance;

    if metrics.is_spam || (fast && !accurate) {
        ArchetypeKind::RushingWind
    } else if slow && rhythmic {
        ArchetypeKind::MusicalSoul
    } else if fast && accurate {
        ArchetypeKind::PrecisionArrow
    } else if slow && accurate {
        ArchetypeKind::CarefulArchitect
    } else if moderate && rhythmic {
        ArchetypeKind::BalancedFlow
    } else if irregular {
        ArchetypeKind::CreativeStorm
    } else {
        ArchetypeKind::ThoughtfulWanderer
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingMetrics {
    pub wpm: f64,
    pub accuracy: f64,
    pub rhythm_variance: f64,
    pub average_rhythm: f64,
}

/// The final result shown on the reading screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub archetype: &'static Archetype,
    pub metrics: ReadingMetrics,
    pub misspelled_words: Vec<String>,
}

impl Reading {
    pub fn traits(&self) -> &[&'static str] {
        &self.archetype.traits
    }

    pub fn text(&self) -> &'static str {
        self.archetype.reading
    }
}

/// `None` means "not ready": nothing was typed or there are no metrics yet.
pub fn analyze_typing_pattern(
    metrics: Option<&MetricsSnapshot>,
    keystrokes: &[Keystroke],
    misspelled_words: &[String],
    thresholds: &Thresholds,
) -> Option<Reading> {
    let metrics = metrics?;
    if keystrokes.is_empty() {
        return None;
    }

    let kind = classify(metrics, thresholds);
    tracing::debug!(archetype = %kind, wpm = metrics.wpm, accuracy = metrics.accuracy, "classified");

    Some(Reading {
        archetype: kind.archetype(),
        metrics: ReadingMetrics {
            wpm: metrics.wpm,
            accuracy: metrics.accuracy,
            rhythm_variance: metrics.rhythm_variance,
            average_rhythm: metrics.average_rhythm,
        },
        misspelled_words: misspelled_words.to_vec(),
    })
}
