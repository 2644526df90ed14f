//! Which IANA names are worth answering with.
//!
//! The IANA database keeps old spellings alive as links (`US/Pacific`,
//! `Asia/Calcutta`, `ROK`). They carry the same rules as the zone they point
//! at, so a generated tree only needs the current `Area/Location` names.

/// Link areas kept for compatibility, every name under them is an alias.
const LEGACY_AREAS: &[&str] = &["Brazil/", "Canada/", "Chile/", "Mexico/", "SystemV/", "US/"];

/// Backward links that look like current `Area/Location` names.
const BACKWARD_LINKS: &[&str] = &[
    "Africa/Asmera",
    "Africa/Timbuktu",
    "America/Argentina/ComodRivadavia",
    "America/Atka",
    "America/Buenos_Aires",
    "America/Catamarca",
    "America/Coral_Harbour",
    "America/Cordoba",
    "America/Ensenada",
    "America/Fort_Wayne",
    "America/Godthab",
    "America/Indianapolis",
    "America/Jujuy",
    "America/Knox_IN",
    "America/Louisville",
    "America/Mendoza",
    "America/Montreal",
    "America/Nipigon",
    "America/Pangnirtung",
    "America/Porto_Acre",
    "America/Rainy_River",
    "America/Rosario",
    "America/Santa_Isabel",
    "America/Shiprock",
    "America/Thunder_Bay",
    "America/Virgin",
    "America/Yellowknife",
    "Antarctica/South_Pole",
    "Asia/Ashkhabad",
    "Asia/Calcutta",
    "Asia/Chongqing",
    "Asia/Chungking",
    "Asia/Dacca",
    "Asia/Harbin",
    "Asia/Istanbul",
    "Asia/Kashgar",
    "Asia/Katmandu",
    "Asia/Macao",
    "Asia/Rangoon",
    "Asia/Saigon",
    "Asia/Tel_Aviv",
    "Asia/Thimbu",
    "Asia/Ujung_Pandang",
    "Asia/Ulan_Bator",
    "Atlantic/Faeroe",
    "Atlantic/Jan_Mayen",
    "Australia/ACT",
    "Australia/Canberra",
    "Australia/Currie",
    "Australia/LHI",
    "Australia/NSW",
    "Australia/North",
    "Australia/Queensland",
    "Australia/South",
    "Australia/Tasmania",
    "Australia/Victoria",
    "Australia/West",
    "Australia/Yancowinna",
    "Europe/Belfast",
    "Europe/Kiev",
    "Europe/Nicosia",
    "Europe/Tiraspol",
    "Europe/Uzhgorod",
    "Europe/Zaporozhye",
    "Pacific/Enderbury",
    "Pacific/Johnston",
    "Pacific/Ponape",
    "Pacific/Samoa",
    "Pacific/Truk",
    "Pacific/Yap",
];

/// Well-known zones kept as representatives over the names they collide
/// with. No two of them share offsets over the default grid.
pub const DEFAULT_PREFERRED: &[&str] = &[
    "Etc/UTC",
    "Europe/London",
    "Europe/Paris",
    "Europe/Moscow",
    "Africa/Lagos",
    "Africa/Johannesburg",
    "Africa/Cairo",
    "Africa/Nairobi",
    "Asia/Dubai",
    "Asia/Karachi",
    "Asia/Kolkata",
    "Asia/Shanghai",
    "Asia/Tokyo",
    "Australia/Sydney",
    "Pacific/Auckland",
    "Pacific/Honolulu",
    "America/Anchorage",
    "America/Los_Angeles",
    "America/Denver",
    "America/Phoenix",
    "America/Chicago",
    "America/New_York",
    "America/Halifax",
    "America/Sao_Paulo",
];

/// Whether `name` is a current IANA zone rather than a link kept for
/// compatibility.
///
/// `Etc/UTC` is the one `Etc/` zone kept: the fixed `Etc/GMT+N` zones have no
/// location, and every other name without an area is a link.
///
/// ```
/// use tzsniff::builder::is_canonical;
///
/// assert!(is_canonical("America/Los_Angeles"));
/// assert!(is_canonical("Etc/UTC"));
/// assert!(!is_canonical("US/Pacific"));
/// assert!(!is_canonical("Asia/Calcutta"));
/// assert!(!is_canonical("ROK"));
/// ```
pub fn is_canonical(name: &str) -> bool {
    if name == "Etc/UTC" {
        return true;
    }
    name.contains('/')
        && !name.starts_with("Etc/")
        && !LEGACY_AREAS.iter().any(|area| name.starts_with(area))
        && !BACKWARD_LINKS.contains(&name)
}
