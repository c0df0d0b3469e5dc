use super::{LeagueProfile, SourceShape};

pub(super) static WNBA: LeagueProfile = LeagueProfile {
    key: "wnba",
    label: "WNBA",
    shape: SourceShape::DatedTables,
    url_template: "https://www.espn.com/wnba/schedule/_/date/{date}",
    team_codes: &[],
    completeness_threshold: 0,
    aliases: &[
        ("Atlanta", "Atlanta Dream"),
        ("Chicago", "Chicago Sky"),
        ("Connecticut", "Connecticut Sun"),
        ("Dallas", "Dallas Wings"),
        ("Golden State", "Golden State Valkyries"),
        ("Indiana", "Indiana Fever"),
        ("Las Vegas", "Las Vegas Aces"),
        ("Los Angeles", "Los Angeles Sparks"),
        ("Minnesota", "Minnesota Lynx"),
        ("New York", "New York Liberty"),
        ("Phoenix", "Phoenix Mercury"),
        ("Seattle", "Seattle Storm"),
        ("Washington", "Washington Mystics"),
    ],
    venues: &[
        ("Atlanta Dream", "Gateway Center Arena"),
        ("Chicago Sky", "Wintrust Arena"),
        ("Connecticut Sun", "Mohegan Sun Arena"),
        ("Dallas Wings", "College Park Center"),
        ("Golden State Valkyries", "Chase Center"),
        ("Indiana Fever", "Gainbridge Fieldhouse"),
        ("Las Vegas Aces", "Michelob Ultra Arena"),
        ("Los Angeles Sparks", "Crypto.com Arena"),
        ("Minnesota Lynx", "Target Center"),
        ("New York Liberty", "Barclays Center"),
        ("Phoenix Mercury", "Footprint Center"),
        ("Seattle Storm", "Climate Pledge Arena"),
        ("Washington Mystics", "Entertainment and Sports Arena"),
    ],
    timezones: &[
        ("Atlanta Dream", "America/New_York"),
        ("Chicago Sky", "America/Chicago"),
        ("Connecticut Sun", "America/New_York"),
        ("Dallas Wings", "America/Chicago"),
        ("Golden State Valkyries", "America/Los_Angeles"),
        ("Indiana Fever", "America/Indiana/Indianapolis"),
        ("Las Vegas Aces", "America/Los_Angeles"),
        ("Los Angeles Sparks", "America/Los_Angeles"),
        ("Minnesota Lynx", "America/Chicago"),
        ("New York Liberty", "America/New_York"),
        ("Phoenix Mercury", "America/Phoenix"),
        ("Seattle Storm", "America/Los_Angeles"),
        ("Washington Mystics", "America/New_York"),
    ],
};
