//! Scripted conversational assistant
//!
//! Keyword-matched canned responses with report context. There is no
//! inference here: replies are string templates filled from the current
//! report and professional insights, with a random pick from a small
//! pool when nothing matches.

use crate::insights::ProfessionalReport;
use crate::models::WeatherReport;
use rand::RngExt;

/// Assistant display name
pub const ASSISTANT_NAME: &str = "Aria";

/// Opening message shown before any user input
pub const GREETING: &str = "Hi! I'm Aria, your personal weather assistant. I can help you with \
     weather insights, professional recommendations, and answer any questions you have. How can \
     I assist you today?";

/// Reply used when composing a response fails
pub const ERROR_REPLY: &str = "I apologize, but I'm having trouble processing your request right \
     now. Please try again in a moment.";

/// Suggested prompts for first-time users
pub const QUICK_ACTIONS: [&str; 5] = [
    "What should I wear today?",
    "How's my commute looking?",
    "Is it good weather for outdoor work?",
    "Should I bring an umbrella?",
    "What's the air quality like?",
];

const GENERAL_REPLIES: [&str; 5] = [
    "That's an interesting question! I'm here to help with weather-related insights and \
     professional recommendations. Could you tell me more about what you're planning?",
    "I'd be happy to assist you! As your weather companion, I can provide insights about \
     current conditions, forecasts, and how weather might impact your professional activities.",
    "Great question! I specialize in weather intelligence and professional recommendations. \
     What specific information would be most helpful for your day?",
    "I'm here to help make your day better with weather insights! Whether it's planning your \
     commute, choosing what to wear, or scheduling outdoor activities, I've got you covered.",
    "That's something I can definitely help with! I combine weather data with professional \
     insights to give you actionable recommendations. What would you like to know more about?",
];

/// Context the assistant answers from
#[derive(Debug, Clone, Copy, Default)]
pub struct AssistantContext<'a> {
    /// Current weather report, when one has been fetched
    pub weather: Option<&'a WeatherReport>,
    /// Professional insights for the report
    pub professional: Option<&'a ProfessionalReport>,
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| message.contains(k))
}

/// Compose a reply to a user message
#[must_use]
pub fn reply(message: &str, context: &AssistantContext<'_>) -> String {
    let message = message.to_lowercase();

    // Weather questions
    if contains_any(&message, &["weather", "temperature", "rain"]) {
        if let Some(weather) = context.weather {
            return format!(
                "Based on current conditions in {}, it's {:.0}°C with {}. {}. Would you like \
                 specific recommendations for your activities today?",
                weather.location,
                weather.current.temperature,
                weather.current.condition.label().to_lowercase(),
                weather.current.description
            );
        }
        return "I'd be happy to help with weather information! Please search for a location \
                first, and I'll provide detailed insights about current conditions and forecasts."
            .to_string();
    }

    // Professional advice
    if contains_any(&message, &["commute", "work", "meeting"]) {
        if let Some(professional) = context.professional {
            return format!(
                "For your professional activities today, I recommend checking the commute \
                 impact ({} severity) and workability score ({}/100). Would you like specific \
                 recommendations for outdoor work or travel?",
                professional.commute_impact.severity.label().to_lowercase(),
                professional.workability_score.score
            );
        }
        return "I can provide professional weather insights including commute impact, \
                workability scores, and travel recommendations. Let me know what specific \
                professional activities you're planning!"
            .to_string();
    }

    // Clothing questions
    if contains_any(&message, &["wear", "clothes", "dress"]) {
        if let Some(weather) = context.weather {
            let temperature = weather.current.temperature;
            if temperature < 10.0 {
                return "Given the cool temperature, I recommend wearing warm layers - a coat \
                        or heavy jacket, long sleeves, and closed-toe shoes. Don't forget \
                        accessories like a scarf or gloves if it's particularly chilly!"
                    .to_string();
            } else if temperature > 25.0 {
                return "It's quite warm today! I suggest lightweight, breathable fabrics, \
                        short sleeves or light long sleeves, and comfortable shoes. Consider \
                        sun protection if you'll be outdoors."
                    .to_string();
            }
            return "The temperature is pleasant today. Business casual or smart casual attire \
                    would work well - perhaps a light jacket you can remove if needed."
                .to_string();
        }
        return "I'd love to help with clothing recommendations! Once you check the weather \
                for your location, I can suggest appropriate attire based on the conditions."
            .to_string();
    }

    // Nothing matched: pick a general reply
    let pick = rand::rng().random_range(0..GENERAL_REPLIES.len());
    GENERAL_REPLIES[pick].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::demo_report;
    use crate::insights::ProfessionalReport;

    #[test]
    fn test_weather_question_with_context() {
        let report = demo_report();
        let context = AssistantContext {
            weather: Some(&report),
            professional: None,
        };
        let answer = reply("What's the weather like?", &context);
        assert!(answer.contains("New York, NY"));
        assert!(answer.contains("22°C"));
        assert!(answer.contains("partly cloudy"));
    }

    #[test]
    fn test_weather_question_without_context() {
        let answer = reply("Will it rain tomorrow?", &AssistantContext::default());
        assert!(answer.contains("search for a location"));
    }

    #[test]
    fn test_commute_question_with_context() {
        let report = demo_report();
        let professional = ProfessionalReport::generate(&report);
        let context = AssistantContext {
            weather: Some(&report),
            professional: Some(&professional),
        };
        let answer = reply("How's my commute looking?", &context);
        assert!(answer.contains("low severity"));
        assert!(answer.contains("100/100"));
    }

    #[test]
    fn test_clothing_bands() {
        let mut report = demo_report();
        report.current.temperature = 5.0;
        let context = AssistantContext {
            weather: Some(&report),
            professional: None,
        };
        assert!(reply("what should I wear?", &context).contains("warm layers"));

        report.current.temperature = 30.0;
        let context = AssistantContext {
            weather: Some(&report),
            professional: None,
        };
        assert!(reply("what should I wear?", &context).contains("breathable fabrics"));

        report.current.temperature = 20.0;
        let context = AssistantContext {
            weather: Some(&report),
            professional: None,
        };
        assert!(reply("how should I dress?", &context).contains("Business casual"));
    }

    #[test]
    fn test_unmatched_message_uses_general_pool() {
        let answer = reply("Tell me a story", &AssistantContext::default());
        assert!(GENERAL_REPLIES.contains(&answer.as_str()));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let report = demo_report();
        let context = AssistantContext {
            weather: Some(&report),
            professional: None,
        };
        let answer = reply("TEMPERATURE please", &context);
        assert!(answer.contains("22°C"));
    }
}
