use persona_domain::constants::{
    CREATED, DROPPED, MIN_YEAR_OF_BIRTH, RENAMED, UNKNOWN_YEAR_OF_BIRTH, YEAR_CHANGED,
};

#[test]
fn constants_match_expected_values() {
    assert_eq!(MIN_YEAR_OF_BIRTH, 1900);
    assert_eq!(UNKNOWN_YEAR_OF_BIRTH, 0);
    assert_eq!(CREATED, "created");
    assert_eq!(RENAMED, "renamed");
    assert_eq!(YEAR_CHANGED, "year_changed");
    assert_eq!(DROPPED, "dropped");
}
