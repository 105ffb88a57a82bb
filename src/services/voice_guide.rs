//! Voice guide sequencer: flattens an itinerary into speakable steps and
//! drives single-utterance sequential playback over an abstract speech
//! synthesizer.

use serde::Serialize;

use crate::models::itinerary::Itinerary;

/// Content language of the guide; voice selection prefers a match.
pub const GUIDE_LANGUAGE: &str = "id";

#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub name: String,
    pub language: String,
}

/// On-device speech synthesis capability. One utterance at a time; `speak`
/// while another utterance is active is undefined, so callers must cancel
/// first. The voice list may arrive asynchronously after the initial query
/// and can be re-fetched at any time.
pub trait SpeechSynthesizer {
    fn available_voices(&self) -> Vec<Voice>;
    fn speak(&mut self, text: &str, voice: Option<&Voice>);
    fn cancel(&mut self);
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct GuideStep {
    pub title: String,
    pub text: String,
    pub location: String,
}

/// Flatten an itinerary into the ordered step list: a synthesized intro,
/// one step per activity in day-then-activity order, and a fixed outro.
pub fn flatten_guide_steps(itinerary: &Itinerary) -> Vec<GuideStep> {
    let mut steps = Vec::new();

    steps.push(GuideStep {
        title: "Selamat Datang!".to_string(),
        text: format!(
            "Halo! Saya asisten perjalanan AI Anda. Kita akan memulai perjalanan \
             ke {} selama {}. Siapkan diri Anda!",
            itinerary.destination, itinerary.duration
        ),
        location: "Start".to_string(),
    });

    for day in &itinerary.daily_itinerary {
        for activity in &day.activities {
            let location = activity
                .location
                .clone()
                .unwrap_or_else(|| "sekitar area".to_string());
            steps.push(GuideStep {
                text: format!(
                    "Pukul {}. {}. {}. Lokasi di {}.",
                    activity.time, activity.activity, activity.description, location
                ),
                title: activity.activity.clone(),
                location,
            });
        }
    }

    steps.push(GuideStep {
        title: "Perjalanan Selesai".to_string(),
        text: "Itinerary telah selesai. Semoga perjalanan Anda menyenangkan!".to_string(),
        location: "Finish".to_string(),
    });

    steps
}

/// Sequential playback over the flattened steps. The current-step pointer
/// is explicit and separate from the speaking flag; starting any step
/// cancels in-flight speech first, so at most one utterance is ever active.
pub struct VoiceGuide<S: SpeechSynthesizer> {
    synth: S,
    steps: Vec<GuideStep>,
    current_step: usize,
    speaking: bool,
    active: bool,
    voice: Option<Voice>,
}

impl<S: SpeechSynthesizer> VoiceGuide<S> {
    pub fn new(synth: S, itinerary: &Itinerary) -> Self {
        let mut guide = Self {
            synth,
            steps: flatten_guide_steps(itinerary),
            current_step: 0,
            speaking: false,
            active: false,
            voice: None,
        };
        guide.refresh_voices();
        guide
    }

    /// First activation expands the control surface and speaks the current
    /// step. Re-activating while already active does nothing.
    pub fn activate(&mut self) {
        if self.active {
            return;
        }
        self.active = true;
        self.refresh_voices();
        self.speak_step(self.current_step);
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.pause();
    }

    pub fn play(&mut self) {
        self.speak_step(self.current_step);
    }

    /// Cancel the current utterance. The step pointer stays where it is.
    pub fn pause(&mut self) {
        self.synth.cancel();
        self.speaking = false;
    }

    /// Advance one step. A no-op at the last step, no wraparound.
    pub fn next(&mut self) {
        if self.current_step + 1 < self.steps.len() {
            self.speak_step(self.current_step + 1);
        }
    }

    /// Go back one step. A no-op at the first step.
    pub fn previous(&mut self) {
        if self.current_step > 0 {
            self.speak_step(self.current_step - 1);
        }
    }

    fn speak_step(&mut self, index: usize) {
        let Some(step) = self.steps.get(index) else {
            return;
        };
        // Cancel-then-start: never two utterances at once.
        self.synth.cancel();
        let text = step.text.clone();
        self.current_step = index;
        self.synth.speak(&text, self.voice.as_ref());
        self.speaking = true;
    }

    /// Synthesizer callback for utterance end or error.
    pub fn utterance_finished(&mut self) {
        self.speaking = false;
    }

    /// Re-query the platform voice list and pick a default if none is
    /// selected yet: prefer a voice matching the content language, else
    /// leave the platform default in place.
    pub fn refresh_voices(&mut self) {
        if self.voice.is_some() {
            return;
        }
        self.voice = self
            .synth
            .available_voices()
            .into_iter()
            .find(|voice| voice.language.starts_with(GUIDE_LANGUAGE));
    }

    /// Select a synthesis voice by name. Returns false if unknown.
    pub fn select_voice(&mut self, name: &str) -> bool {
        match self.synth.available_voices().into_iter().find(|v| v.name == name) {
            Some(voice) => {
                self.voice = Some(voice);
                true
            }
            None => false,
        }
    }

    pub fn selected_voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn current_text(&self) -> Option<&str> {
        self.steps.get(self.current_step).map(|step| step.text.as_str())
    }
}
