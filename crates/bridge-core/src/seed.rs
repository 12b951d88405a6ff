//! Demo data: a handful of requests and the partner directory for San
//! Francisco. The server seeds itself from here, and the dashboard falls back
//! to it when the service cannot be reached on startup.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::{
  lifecycle::Status,
  request::{Category, Location, Request, Tone},
  resource::{Resource, ResourceKind},
};

fn strings(items: &[&str]) -> Vec<String> { items.iter().map(|s| s.to_string()).collect() }

/// Seed requests, newest first.
pub fn requests() -> Vec<Request> {
  let now = Utc::now();
  let mut requests = vec![
    Request {
      id:           Uuid::new_v4(),
      category:     Category::Food,
      description:  "Need dinner near Mission".into(),
      tone:         Tone::Calm,
      status:       Status::Open,
      location:     Location::new(37.7599, -122.4148, "Mission District, SF"),
      name:         Some("Maria".into()),
      phone:        Some("+14155551234".into()),
      conversation: strings(&[
        "Hi, I'm looking for a hot meal tonight.",
        "I can help you find nearby food banks. There's one on 16th Street open until 7pm.",
      ]),
      memory:       strings(&[
        "Vegetarian preference",
        "Available after 6pm",
        "Lives in Mission area",
      ]),
      timestamp:    now - Duration::minutes(30),
      safety_score: Some(1.0),
    },
    Request {
      id:           Uuid::new_v4(),
      category:     Category::Shelter,
      description:  "Looking for bed tonight in SoMa".into(),
      tone:         Tone::Anxious,
      status:       Status::Open,
      location:     Location::new(37.7749, -122.4194, "SoMa, SF"),
      name:         None,
      phone:        None,
      conversation: strings(&[
        "I need a place to sleep tonight, it's getting cold.",
        "I understand. Let me check shelter availability in SoMa for you.",
      ]),
      memory:       strings(&["Prefers quiet spaces", "Has backpack with belongings"]),
      timestamp:    now - Duration::minutes(15),
      safety_score: Some(3.0),
    },
    Request {
      id:           Uuid::new_v4(),
      category:     Category::Legal,
      description:  "Need help with housing documentation".into(),
      tone:         Tone::Calm,
      status:       Status::Assigned,
      location:     Location::new(37.7833, -122.4167, "Tenderloin, SF"),
      name:         Some("James".into()),
      phone:        Some("+14155552468".into()),
      conversation: strings(&[
        "I need assistance filling out housing assistance forms.",
        "I can connect you with legal aid services. They have walk-in hours tomorrow.",
      ]),
      memory:       strings(&[
        "Limited English proficiency",
        "Needs Spanish interpreter",
        "Has partial documentation",
      ]),
      timestamp:    now - Duration::minutes(60),
      safety_score: None,
    },
    Request {
      id:           Uuid::new_v4(),
      category:     Category::Other,
      description:  "Medical supplies needed".into(),
      tone:         Tone::Distressed,
      status:       Status::Open,
      location:     Location::new(37.7694, -122.4862, "Richmond District, SF"),
      name:         None,
      phone:        None,
      conversation: strings(&[
        "I ran out of my medication and can't afford refills.",
        "This is urgent. Let me connect you with a health clinic that offers assistance programs.",
      ]),
      memory:       strings(&[
        "Has chronic condition",
        "No health insurance",
        "Needs prescription refill urgently",
      ]),
      timestamp:    now - Duration::minutes(5),
      safety_score: Some(4.0),
    },
  ];
  requests.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
  requests
}

fn resource(
  id: &str,
  kind: ResourceKind,
  name: &str,
  location: Location,
  phone: &str,
  hours: &str,
  services: &[&str],
) -> Resource {
  Resource {
    id: id.into(),
    kind,
    name: name.into(),
    location,
    phone: Some(phone.into()),
    hours: Some(hours.into()),
    services: strings(services),
  }
}

/// The partner directory.
pub fn resources() -> Vec<Resource> {
  vec![
    resource(
      "res-1",
      ResourceKind::Food,
      "Mission Food Bank",
      Location::new(37.7599, -122.4148, "1234 Mission St, San Francisco, CA 94103"),
      "415-555-1234",
      "Mon-Fri 9am-5pm",
      &["Hot meals", "Groceries", "Food pantry"],
    ),
    resource(
      "res-2",
      ResourceKind::Food,
      "St. Anthony Foundation",
      Location::new(37.7833, -122.4167, "150 Golden Gate Ave, San Francisco, CA 94102"),
      "415-241-2600",
      "Daily 9am-4pm",
      &["Free dining room", "Clothing", "Medical clinic"],
    ),
    resource(
      "res-3",
      ResourceKind::Food,
      "Glide Memorial Church",
      Location::new(37.7844, -122.4121, "330 Ellis St, San Francisco, CA 94102"),
      "415-674-6000",
      "Daily 7am-9pm",
      &["Free meals", "Healthcare", "Housing assistance"],
    ),
    resource(
      "res-4",
      ResourceKind::Shelter,
      "Navigation Center SoMa",
      Location::new(37.7749, -122.4194, "16th St & Mission, San Francisco, CA 94103"),
      "415-557-5153",
      "24/7",
      &["Emergency shelter", "Case management", "Pet-friendly"],
    ),
    resource(
      "res-5",
      ResourceKind::Shelter,
      "Next Door Shelter",
      Location::new(37.7694, -122.4862, "1001 Polk St, San Francisco, CA 94109"),
      "415-668-5955",
      "24/7",
      &["Family shelter", "Meals", "Childcare"],
    ),
    resource(
      "res-6",
      ResourceKind::Legal,
      "Coalition on Homelessness",
      Location::new(37.7847, -122.4075, "468 Turk St, San Francisco, CA 94102"),
      "415-346-3740",
      "Mon-Fri 9am-5pm",
      &["Legal aid", "Housing advocacy", "Benefits assistance"],
    ),
    resource(
      "res-7",
      ResourceKind::Medical,
      "SF Free Clinic",
      Location::new(37.7699, -122.4525, "4900 California St, San Francisco, CA 94118"),
      "415-487-5632",
      "Tue-Thu 6pm-9pm",
      &["Primary care", "Mental health", "Dental"],
    ),
  ]
}
