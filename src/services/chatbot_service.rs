use chrono::{NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::Event;
use crate::store::Tables;

const MAX_LISTED_EVENTS: usize = 5;

lazy_static! {
    static ref GREETING: Regex =
        Regex::new(r"^(hi|hello|hey|greetings|good morning|good afternoon|good evening)").unwrap();
    static ref HELP: Regex = Regex::new(r"what can you do|help|how to use|capabilities").unwrap();
    static ref EVENTS: Regex =
        Regex::new(r"events?|activities?|what('s| is) (happening|available|on)|things to do")
            .unwrap();
    static ref HEALTH: Regex = Regex::new(r"health|fitness|wellness|exercise|yoga").unwrap();
    static ref EDUCATION: Regex =
        Regex::new(r"education|learning|class|course|workshop|skill").unwrap();
    static ref SOCIAL: Regex =
        Regex::new(r"social|community|gathering|meetup|networking").unwrap();
    static ref TECHNOLOGY: Regex = Regex::new(r"tech|technology|digital|computer|coding").unwrap();
    static ref LOCATION: Regex = Regex::new(r"near me|nearby|around|location|where").unwrap();
    static ref CAREGIVER: Regex =
        Regex::new(r"caregiver|babysit|elderly care|care service").unwrap();
    static ref COMMUNITY: Regex = Regex::new(r"community|communities|group|join").unwrap();
    static ref REGISTRATION: Regex =
        Regex::new(r"register|sign up|create account|join platform").unwrap();
    static ref THANKS: Regex = Regex::new(r"thank|thanks|appreciate").unwrap();
    static ref GOODBYE: Regex = Regex::new(r"bye|goodbye|see you|exit").unwrap();
}

/// Picks a reply for the (lowercased) user message: first matching rule
/// wins, in the same precedence the platform has always used.
pub fn process_message(tables: &Tables, message: &str) -> String {
    let message = message.to_lowercase();

    if GREETING.is_match(&message) {
        return "Hello! 👋 I'm your community assistant. I can help you find events, \
                activities, and answer questions about our community platform. What would \
                you like to know?"
            .to_string();
    }

    if HELP.is_match(&message) {
        return "I can help you with:\n• Finding upcoming events and activities\n• Searching \
                events by category (Health, Education, Social, Technology)\n• Getting event \
                details and locations\n• Learning about our community features\n• Finding \
                caregivers and support services\n\nJust ask me anything!"
            .to_string();
    }

    if EVENTS.is_match(&message) {
        return upcoming_events_response(tables);
    }

    if HEALTH.is_match(&message) {
        return category_events_response(tables, "Health");
    }
    if EDUCATION.is_match(&message) {
        return category_events_response(tables, "Education");
    }
    if SOCIAL.is_match(&message) {
        return category_events_response(tables, "Social");
    }
    if TECHNOLOGY.is_match(&message) {
        return category_events_response(tables, "Technology");
    }

    if LOCATION.is_match(&message) {
        return "I can help you find events near you! The events page allows you to search \
                by location. Would you like me to show you upcoming events in your area? You \
                can also visit our Events page to browse by location."
            .to_string();
    }

    if CAREGIVER.is_match(&message) {
        return "We have a Caregivers section where you can find verified caregivers offering \
                services like babysitting, elderly care, and more. They're rated by our \
                community and you can contact them directly. Would you like to browse \
                available caregivers?"
            .to_string();
    }

    if COMMUNITY.is_match(&message) {
        return "You can join various communities on our platform! We have communities for \
                different interests and neighbourhoods. Visit the Communities page to explore \
                and join groups that interest you."
            .to_string();
    }

    if REGISTRATION.is_match(&message) {
        return "To join our community, click on 'Sign Up' in the navigation menu. \
                Registration is quick and free! Once registered, you can create events, join \
                communities, and connect with caregivers."
            .to_string();
    }

    if THANKS.is_match(&message) {
        return "You're welcome! 😊 Is there anything else I can help you with?".to_string();
    }

    if GOODBYE.is_match(&message) {
        return "Goodbye! Feel free to chat with me anytime you need help. Have a great day! 👋"
            .to_string();
    }

    "I'm not sure I understand that question. Here are some things you can ask me:\n\
     • 'What events are available?'\n• 'Show me health activities'\n• 'How do I find \
     caregivers?'\n• 'What communities can I join?'\n\nWhat would you like to know?"
        .to_string()
}

/// Upcoming events, soonest first. Events with unparseable dates are
/// treated as past and skipped.
fn upcoming_events<'a>(tables: &'a Tables, category: Option<&str>) -> Vec<(&'a Event, NaiveDate)> {
    let today = Utc::now().date_naive();
    let mut upcoming: Vec<(&Event, NaiveDate)> = tables
        .events
        .iter()
        .filter(|e| category.map_or(true, |c| e.category == c))
        .filter_map(|e| {
            NaiveDate::parse_from_str(&e.date, "%Y-%m-%d")
                .ok()
                .filter(|d| *d >= today)
                .map(|d| (e, d))
        })
        .collect();
    upcoming.sort_by_key(|(_, date)| *date);
    upcoming.truncate(MAX_LISTED_EVENTS);
    upcoming
}

fn upcoming_events_response(tables: &Tables) -> String {
    let upcoming = upcoming_events(tables, None);
    if upcoming.is_empty() {
        return "I don't see any upcoming events at the moment. Please check back later or \
                create your own event!"
            .to_string();
    }

    let mut response = String::from("Here are some upcoming events:\n\n");
    for (index, (event, date)) in upcoming.iter().enumerate() {
        response.push_str(&format!("{}. **{}**\n", index + 1, event.title));
        response.push_str(&format!(
            "   📅 {} at {}\n",
            date.format("%b %-d, %Y"),
            event.time
        ));
        response.push_str(&format!("   📍 {}\n", event.location));
        response.push_str(&format!("   🏷️ {}\n\n", event.category));
    }
    response.push_str("Visit the Events page to see more details and register!");
    response
}

fn category_events_response(tables: &Tables, category: &str) -> String {
    let upcoming = upcoming_events(tables, Some(category));
    if upcoming.is_empty() {
        return format!(
            "I don't see any upcoming {category} events right now. Check out other \
             categories or create your own {category} event!"
        );
    }

    let mut response = format!("Here are upcoming {} events:\n\n", category);
    for (index, (event, date)) in upcoming.iter().enumerate() {
        response.push_str(&format!("{}. **{}**\n", index + 1, event.title));
        response.push_str(&format!(
            "   📅 {} at {}\n",
            date.format("%b %-d"),
            event.time
        ));
        response.push_str(&format!("   📍 {}\n\n", event.location));
    }
    response.push_str(&format!("Check the Events page for more {} activities!", category));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn event(title: &str, category: &str, days_from_now: i64) -> Event {
        let date = (Utc::now() + Duration::days(days_from_now))
            .date_naive()
            .format("%Y-%m-%d")
            .to_string();
        Event {
            id: title.to_string(),
            title: title.to_string(),
            description: String::new(),
            date,
            time: "10:00".to_string(),
            location: "Community Centre".to_string(),
            category: category.to_string(),
            max_attendees: None,
            community_id: None,
            organizer_id: "o".to_string(),
            attendees: vec![],
            coordinates: None,
            external_url: None,
            created_at: Utc::now(),
        }
    }

    fn tables_with(events: Vec<Event>) -> Tables {
        Tables {
            events,
            ..Tables::default()
        }
    }

    #[test]
    fn greeting_wins_over_later_rules() {
        let tables = Tables::default();
        let reply = process_message(&tables, "Hello, what events are on?");
        assert!(reply.contains("community assistant"));
    }

    #[test]
    fn event_query_lists_upcoming_only() {
        let tables = tables_with(vec![
            event("Tai Chi", "Health", 3),
            event("Old Gala", "Social", -10),
        ]);
        let reply = process_message(&tables, "what events are available?");
        assert!(reply.contains("Tai Chi"));
        assert!(!reply.contains("Old Gala"));
    }

    #[test]
    fn category_rule_filters() {
        let tables = tables_with(vec![
            event("Yoga in the Park", "Health", 2),
            event("Coding 101", "Technology", 2),
        ]);
        let reply = process_message(&tables, "any yoga classes?");
        assert!(reply.contains("Yoga in the Park"));
        assert!(!reply.contains("Coding 101"));
    }

    #[test]
    fn empty_calendar_has_friendly_fallback() {
        let reply = process_message(&Tables::default(), "things to do");
        assert!(reply.contains("check back later"));
    }

    #[test]
    fn unknown_message_gets_suggestions() {
        let reply = process_message(&Tables::default(), "qwerty");
        assert!(reply.contains("not sure I understand"));
    }
}
