//! Concierge personas: prompt, voice, model, and avatar set.

use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

/// Profile used when the configured ID is unknown.
pub const DEFAULT_PROFILE_ID: &str = "test_concierge";

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const HOST_PROTOCOL: &str = "\
You are the Concierge at MG Cafe. Follow this protocol:
1. Greet the guest warmly.
2. Ask for their name and party size. Ensure you have the guest's name before proceeding with check-in or waitlist.
3. Use check_availability_tool to check if a table is available for their party size.
4. If a table is available: Use add_guest_tool with action='check_in' to assign the table.
5. If NO table is available: Use add_guest_tool with action='waitlist' to add them to the waitlist. Always add guests to waitlist when no tables are available - do not just tell them there are no tables. When a guest is added to the waitlist, you must inform them of their position and the exact estimated wait time as provided by the tool.
6. After assigning a table or adding to waitlist, confirm the action politely and end the interaction.
7. Keep responses brief, friendly, and speak as the on-screen avatar.";

const AMBER_PROMPT: &str = "\
You are Amber, the warm, high-energy host at MG Cafe.
When the conversation starts, introduce yourself casually and ask how you can help.
Always respond to what the guest actually said; never answer a specific question with a canned greeting.
You need the guest's name and party size. Narrate the search casually, then call check_availability_tool.
When a table is free you MUST call add_guest_tool with action='check_in' before saying the table is theirs. Say \"Head inside\", never \"Follow me\".
When nothing is free you MUST call add_guest_tool with action='waitlist', then tell them their position and the estimated wait from the tool, and suggest the Sunny Signature Burger while they wait.
Never claim a table is assigned without the tool call.";

/// A concierge persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ConciergeProfile {
    /// Stable profile identifier (`CONCIERGE_ID`).
    pub id: String,
    /// Name shown in the UI.
    pub display_name: String,
    /// Short description.
    pub description: String,
    /// Preferred chat model.
    pub model: String,
    /// Default speech voice.
    pub tts_voice: String,
    /// System prompt for the chat model.
    #[serde(skip_serializing)]
    pub prompt: String,
    /// Avatar video per UI state (`idle`, `listening`, `speaking`).
    pub avatars: BTreeMap<String, String>,
}

fn avatars(listening: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("idle".to_string(), "avatar-idle.mp4".to_string()),
        ("listening".to_string(), listening.to_string()),
        ("speaking".to_string(), "avatar-speaking.mp4".to_string()),
    ])
}

impl ConciergeProfile {
    /// Returns the built-in profile with `id`, or the default profile.
    #[must_use]
    pub fn builtin(id: Option<&str>) -> Self {
        match id {
            Some("maya") => Self {
                id: "maya".to_string(),
                display_name: "Maya Concierge".to_string(),
                description:
                    "Concierge profile for Maya with a British voice and shared idle/listening avatar."
                        .to_string(),
                model: DEFAULT_MODEL.to_string(),
                tts_voice: "en-GB-Chirp3-HD-Erinome".to_string(),
                prompt: HOST_PROTOCOL.to_string(),
                avatars: avatars("avatar-idle.mp4"),
            },
            Some("amber") => Self {
                id: "amber".to_string(),
                display_name: "Amber Concierge".to_string(),
                description: "Amber concierge with high-energy host vibe for MG Cafe.".to_string(),
                model: DEFAULT_MODEL.to_string(),
                tts_voice: "en-US-Chirp3-HD-Sulafat".to_string(),
                prompt: AMBER_PROMPT.to_string(),
                avatars: avatars("avatar-listening.mp4"),
            },
            _ => Self {
                id: DEFAULT_PROFILE_ID.to_string(),
                display_name: "Test Concierge (MG Cafe)".to_string(),
                description: "Friendly host for MG Cafe (test concierge onboarding).".to_string(),
                model: DEFAULT_MODEL.to_string(),
                tts_voice: "en-IN-Standard-E".to_string(),
                prompt: HOST_PROTOCOL.to_string(),
                avatars: avatars("avatar-listening.mp4"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_profiles_resolve() {
        assert_eq!(ConciergeProfile::builtin(Some("maya")).id, "maya");
        assert_eq!(
            ConciergeProfile::builtin(Some("amber")).tts_voice,
            "en-US-Chirp3-HD-Sulafat"
        );
    }

    #[test]
    fn unknown_or_missing_falls_back_to_default() {
        assert_eq!(ConciergeProfile::builtin(Some("bob")).id, DEFAULT_PROFILE_ID);
        assert_eq!(ConciergeProfile::builtin(None).id, DEFAULT_PROFILE_ID);
    }

    #[test]
    fn prompt_is_not_serialized() {
        let json = serde_json::to_value(ConciergeProfile::builtin(None)).unwrap_or_default();
        assert!(json.get("prompt").is_none());
        assert_eq!(json["avatars"]["idle"], "avatar-idle.mp4");
    }
}
