use super::{LeagueProfile, SourceShape};

pub(super) static NBA: LeagueProfile = LeagueProfile {
    key: "nba",
    label: "NBA",
    shape: SourceShape::DatedTables,
    url_template: "https://www.espn.com/nba/schedule/_/date/{date}",
    team_codes: &[],
    completeness_threshold: 0,
    aliases: &[
        ("Atlanta", "Atlanta Hawks"),
        ("Boston", "Boston Celtics"),
        ("Brooklyn", "Brooklyn Nets"),
        ("Charlotte", "Charlotte Hornets"),
        ("Chicago", "Chicago Bulls"),
        ("Cleveland", "Cleveland Cavaliers"),
        ("Dallas", "Dallas Mavericks"),
        ("Denver", "Denver Nuggets"),
        ("Detroit", "Detroit Pistons"),
        ("Golden State", "Golden State Warriors"),
        ("Houston", "Houston Rockets"),
        ("Indiana", "Indiana Pacers"),
        ("LA Clippers", "Los Angeles Clippers"),
        ("L.A. Lakers", "Los Angeles Lakers"),
        ("Memphis", "Memphis Grizzlies"),
        ("Miami", "Miami Heat"),
        ("Milwaukee", "Milwaukee Bucks"),
        ("Minnesota", "Minnesota Timberwolves"),
        ("New Orleans", "New Orleans Pelicans"),
        ("New York", "New York Knicks"),
        ("Oklahoma City", "Oklahoma City Thunder"),
        ("Orlando", "Orlando Magic"),
        ("Philadelphia", "Philadelphia 76ers"),
        ("Phoenix", "Phoenix Suns"),
        ("Portland", "Portland Trail Blazers"),
        ("Sacramento", "Sacramento Kings"),
        ("San Antonio", "San Antonio Spurs"),
        ("Toronto", "Toronto Raptors"),
        ("Utah", "Utah Jazz"),
        ("Washington", "Washington Wizards"),
    ],
    venues: &[
        ("Atlanta Hawks", "State Farm Arena"),
        ("Boston Celtics", "TD Garden"),
        ("Brooklyn Nets", "Barclays Center"),
        ("Charlotte Hornets", "Spectrum Center"),
        ("Chicago Bulls", "United Center"),
        ("Cleveland Cavaliers", "Rocket Mortgage FieldHouse"),
        ("Dallas Mavericks", "American Airlines Center"),
        ("Denver Nuggets", "Ball Arena"),
        ("Detroit Pistons", "Little Caesars Arena"),
        ("Golden State Warriors", "Chase Center"),
        ("Houston Rockets", "Toyota Center"),
        ("Indiana Pacers", "Gainbridge Fieldhouse"),
        ("Los Angeles Clippers", "Crypto.com Arena"),
        ("Los Angeles Lakers", "Crypto.com Arena"),
        ("Memphis Grizzlies", "FedExForum"),
        ("Miami Heat", "Kaseya Center"),
        ("Milwaukee Bucks", "Fiserv Forum"),
        ("Minnesota Timberwolves", "Target Center"),
        ("New Orleans Pelicans", "Smoothie King Center"),
        ("New York Knicks", "Madison Square Garden"),
        ("Oklahoma City Thunder", "Paycom Center"),
        ("Orlando Magic", "Amway Center"),
        ("Philadelphia 76ers", "Wells Fargo Center"),
        ("Phoenix Suns", "Footprint Center"),
        ("Portland Trail Blazers", "Moda Center"),
        ("Sacramento Kings", "Golden 1 Center"),
        ("San Antonio Spurs", "Frost Bank Center"),
        ("Toronto Raptors", "Scotiabank Arena"),
        ("Utah Jazz", "Delta Center"),
        ("Washington Wizards", "Capital One Arena"),
    ],
    timezones: &[
        ("Atlanta Hawks", "America/New_York"),
        ("Boston Celtics", "America/New_York"),
        ("Brooklyn Nets", "America/New_York"),
        ("Charlotte Hornets", "America/New_York"),
        ("Chicago Bulls", "America/Chicago"),
        ("Cleveland Cavaliers", "America/New_York"),
        ("Dallas Mavericks", "America/Chicago"),
        ("Denver Nuggets", "America/Denver"),
        ("Detroit Pistons", "America/Detroit"),
        ("Golden State Warriors", "America/Los_Angeles"),
        ("Houston Rockets", "America/Chicago"),
        ("Indiana Pacers", "America/Indiana/Indianapolis"),
        ("Los Angeles Clippers", "America/Los_Angeles"),
        ("Los Angeles Lakers", "America/Los_Angeles"),
        ("Memphis Grizzlies", "America/Chicago"),
        ("Miami Heat", "America/New_York"),
        ("Milwaukee Bucks", "America/Chicago"),
        ("Minnesota Timberwolves", "America/Chicago"),
        ("New Orleans Pelicans", "America/Chicago"),
        ("New York Knicks", "America/New_York"),
        ("Oklahoma City Thunder", "America/Chicago"),
        ("Orlando Magic", "America/New_York"),
        ("Philadelphia 76ers", "America/New_York"),
        ("Phoenix Suns", "America/Phoenix"),
        ("Portland Trail Blazers", "America/Los_Angeles"),
        ("Sacramento Kings", "America/Los_Angeles"),
        ("San Antonio Spurs", "America/Chicago"),
        ("Toronto Raptors", "America/Toronto"),
        ("Utah Jazz", "America/Denver"),
        ("Washington Wizards", "America/New_York"),
    ],
};
