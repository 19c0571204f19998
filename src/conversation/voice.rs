use super::speech::Voice;
use super::Teacher;

/// Picks the synthesis voice for a teacher from what the host offers.
pub trait VoiceSelector: Send + Sync {
    fn select_voice(&self, teacher: Teacher, voices: &[Voice]) -> Option<Voice>;
}

/// Matches on voice names: a female-sounding Japanese voice for Nanami and
/// a male-sounding one for Naoki, falling back to list position.
#[derive(Debug, Default, Clone, Copy)]
pub struct NameMatchSelector;

fn is_japanese(voice: &Voice) -> bool {
    voice.lang.contains("ja") || voice.lang.contains("JP")
}

fn sounds_female(name: &str) -> bool {
    name.contains("female") || name.contains("woman") || name.contains("nanami")
}

// "female" and "woman" contain "male" and "man".
fn sounds_male(name: &str) -> bool {
    let plain = name.replace("female", "").replace("woman", "");
    plain.contains("male") || plain.contains("man") || plain.contains("naoki")
}

impl VoiceSelector for NameMatchSelector {
    fn select_voice(&self, teacher: Teacher, voices: &[Voice]) -> Option<Voice> {
        let japanese: Vec<&Voice> = voices.iter().filter(|v| is_japanese(v)).collect();

        let preferred = japanese.iter().find(|v| {
            let name = v.name.to_lowercase();
            match teacher {
                Teacher::Nanami => sounds_female(&name),
                Teacher::Naoki => sounds_male(&name),
            }
        });

        let fallback = match teacher {
            Teacher::Nanami => japanese.first(),
            Teacher::Naoki => japanese.get(1).or_else(|| japanese.first()),
        };

        preferred.or(fallback).map(|v| (*v).clone())
    }
}
