//! Prompt construction for the generation service.
//!
//! Pure functions: the same request and mode always render the same prompt
//! text. No I/O happens here; the planner owns the network call.

use crate::models::chat::ChatTopic;
use crate::models::trip::{TripMode, TripRequest};

/// JSON shape the model must reply with. This is the one wire format fixed
/// by the design; the parser in the planner validates against it.
const ITINERARY_JSON_SHAPE: &str = r#"{
  "tripTitle": "string",
  "destination": "string",
  "duration": "string, misal '3 Hari 2 Malam'",
  "tripType": "general atau umrah",
  "totalCostEstimate": "string, sebutkan mata uang",
  "highlights": ["string"],
  "importantInfo": ["string"],
  "dailyItinerary": [
    {
      "day": 1,
      "title": "string",
      "activities": [
        {
          "time": "string, misal '08:00'",
          "activity": "string",
          "description": "string",
          "location": "string, nama tempat yang bisa dicari di peta",
          "cost": "string, opsional"
        }
      ]
    }
  ]
}"#;

const HONORIFIC_RULE: &str = "Tulis semua shalawat dan gelar kehormatan secara lengkap, \
misalnya 'Shallallahu 'alaihi wa sallam' dan 'Radhiyallahu 'anhu'. \
Jangan pernah menyingkatnya menjadi 'SAW', 'RA', atau singkatan lain.";

/// Render a trip request into the full generation prompt: mode-specific
/// tone and content constraints followed by the strict JSON output shape.
pub fn build_itinerary_prompt(request: &TripRequest, mode: TripMode) -> String {
    let mut lines: Vec<String> = Vec::new();

    match mode {
        TripMode::General => {
            lines.push(format!(
                "Buatkan itinerary perjalanan wisata ke {} selama {} hari untuk {} orang.",
                request.destination, request.duration_days, request.participants
            ));
            lines.push(format!("Estimasi budget: kelas {}.", request.budget.as_str()));
        }
        TripMode::Umrah => {
            lines.push(format!(
                "Buatkan itinerary ibadah umrah selama {} hari untuk {} jamaah, \
                 berangkat dari atau dengan tujuan tambahan {}.",
                request.duration_days, request.participants, request.destination
            ));
            lines.push(format!("Kelas paket: {}.", request.budget.as_str()));
            if let Some(date) = &request.departure_date {
                lines.push(format!("Rencana keberangkatan: {}.", date));
            }
            lines.push(HONORIFIC_RULE.to_string());
        }
    }

    if !request.travel_style.is_empty() {
        let label = match mode {
            TripMode::General => "Gaya perjalanan",
            TripMode::Umrah => "Fokus ibadah dan ziarah",
        };
        lines.push(format!("{}: {}.", label, request.travel_style.join(", ")));
    }

    if let Some(notes) = &request.special_requests {
        if !notes.trim().is_empty() {
            lines.push(format!("Permintaan khusus: {}.", notes.trim()));
        }
    }

    lines.push(format!(
        "Isi dailyItinerary dengan tepat {} hari, hari pertama bernomor 1.",
        request.duration_days
    ));
    lines.push(format!(
        "Set tripType ke \"{}\". Untuk setiap aktivitas, isi location dengan \
         nama tempat nyata yang bisa ditemukan di peta.",
        mode.as_str()
    ));
    lines.push(
        "Balas HANYA dengan JSON valid sesuai bentuk berikut, tanpa teks lain \
         dan tanpa markup:"
            .to_string(),
    );
    lines.push(ITINERARY_JSON_SHAPE.to_string());

    lines.join("\n")
}

/// Fixed system instruction for the conversational assistant, per topic.
pub fn assistant_instruction(topic: ChatTopic) -> &'static str {
    match topic {
        ChatTopic::General => {
            "Kamu adalah Virtual Tour Leader, asisten perjalanan untuk wisatawan \
             di Indonesia dan mancanegara. Jawab singkat, ramah, dan praktis, \
             dalam bahasa yang sama dengan pertanyaan pengguna. Jangan gunakan \
             markup HTML; jawab dalam teks biasa."
        }
        ChatTopic::Umrah => {
            "Kamu adalah Virtual Muthawif, pendamping ibadah umrah. Jawab dengan \
             sopan dan jelas seputar manasik, doa, dan ziarah. Tulis semua \
             shalawat dan gelar kehormatan secara lengkap, misalnya \
             'Shallallahu 'alaihi wa sallam'; jangan pernah menyingkatnya \
             menjadi 'SAW'. Jangan gunakan markup HTML; jawab dalam teks biasa."
        }
    }
}
