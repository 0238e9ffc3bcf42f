use persona_domain::events::PersonEvent;
use persona_domain::person::{PersonName, PersonSnapshot};
use serde_json::json;

fn snapshot(first: &str, last: &str, year: u32) -> PersonSnapshot {
    PersonSnapshot::new(PersonName::new(first, last), year)
}

#[test]
fn events_render_as_log_lines() {
    assert_eq!(
        PersonEvent::Instantiated.to_string(),
        "Person object instantiated without names or birth year"
    );
    assert_eq!(
        PersonEvent::Created { snapshot: snapshot("Sponge", "Bob", 1999) }.to_string(),
        "Person object instantiated: Sponge Bob, year of birth 1999"
    );
    assert_eq!(
        PersonEvent::YearOfBirthChanged {
            name: PersonName::new("Mickey", "Mouse"),
            previous: 0,
            current: 1928,
        }
        .to_string(),
        "Person Mickey Mouse, born in 0 is now born in 1928"
    );
    assert_eq!(
        PersonEvent::OutOfScope { snapshot: snapshot("Scooby", "Doo", 1969) }.to_string(),
        "Person Scooby Doo born in 1969 goes out of scope"
    );
}

#[test]
fn events_serialize_with_a_tag() {
    let event = PersonEvent::Renamed {
        previous: PersonName::default(),
        current: PersonName::new("Mickey", "Mouse"),
    };
    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(
        value,
        json!({
            "event": "renamed",
            "previous": { "first": "", "last": "" },
            "current": { "first": "Mickey", "last": "Mouse" }
        })
    );

    let unit = serde_json::to_value(PersonEvent::Instantiated).unwrap();
    assert_eq!(unit, json!({ "event": "instantiated" }));
}
