use chatkit_domain::lockable::Lockable;
use chatkit_macros::lockable;

#[lockable]
struct Reminder {
    text: String,
}

fn main() {
    let mut r = Reminder {
        locking: false,
        execution_guard: None,
        text: "water the plants".into(),
    };
    assert!(!r.ensure_guard());

    r.set_locking(true);
    assert!(r.ensure_guard());
    assert!(r.active_guard().is_some());
    assert_eq!(r.text, "water the plants");
}
