use super::{LeagueProfile, SourceShape};

pub(super) static MLB: LeagueProfile = LeagueProfile {
    key: "mlb",
    label: "MLB",
    shape: SourceShape::TeamSeason,
    url_template: "https://www.mlb.com/{team}/schedule/{year}/fullseason",
    team_codes: &[
        "dbacks", "braves", "orioles", "redsox", "cubs", "whitesox", "reds", "guardians", "rockies",
        "tigers", "astros", "royals", "angels", "dodgers", "marlins", "brewers", "twins", "mets",
        "yankees", "athletics", "phillies", "pirates", "padres", "giants", "mariners", "cardinals",
        "rays", "rangers", "bluejays", "nationals",
    ],
    // a full regular season lists at least 162 game blocks
    completeness_threshold: 162,
    aliases: &[
        ("AZ", "Arizona Diamondbacks"),
        ("ATL", "Atlanta Braves"),
        ("BAL", "Baltimore Orioles"),
        ("BOS", "Boston Red Sox"),
        ("CHC", "Chicago Cubs"),
        ("CWS", "Chicago White Sox"),
        ("CIN", "Cincinnati Reds"),
        ("CLE", "Cleveland Guardians"),
        ("COL", "Colorado Rockies"),
        ("DET", "Detroit Tigers"),
        ("HOU", "Houston Astros"),
        ("KC", "Kansas City Royals"),
        ("LAA", "Los Angeles Angels"),
        ("LAD", "Los Angeles Dodgers"),
        ("MIA", "Miami Marlins"),
        ("MIL", "Milwaukee Brewers"),
        ("MIN", "Minnesota Twins"),
        ("NYM", "New York Mets"),
        ("NYY", "New York Yankees"),
        ("ATH", "Athletics"),
        ("PHI", "Philadelphia Phillies"),
        ("PIT", "Pittsburgh Pirates"),
        ("SD", "San Diego Padres"),
        ("SF", "San Francisco Giants"),
        ("SEA", "Seattle Mariners"),
        ("STL", "St. Louis Cardinals"),
        ("TB", "Tampa Bay Rays"),
        ("TEX", "Texas Rangers"),
        ("TOR", "Toronto Blue Jays"),
        ("WSH", "Washington Nationals"),
    ],
    venues: &[
        ("Arizona Diamondbacks", "Chase Field"),
        ("Atlanta Braves", "Truist Park"),
        ("Baltimore Orioles", "Oriole Park at Camden Yards"),
        ("Boston Red Sox", "Fenway Park"),
        ("Chicago Cubs", "Wrigley Field"),
        ("Chicago White Sox", "Guaranteed Rate Field"),
        ("Cincinnati Reds", "Great American Ball Park"),
        ("Cleveland Guardians", "Progressive Field"),
        ("Colorado Rockies", "Coors Field"),
        ("Detroit Tigers", "Comerica Park"),
        ("Houston Astros", "Minute Maid Park"),
        ("Kansas City Royals", "Kauffman Stadium"),
        ("Los Angeles Angels", "Angel Stadium"),
        ("Los Angeles Dodgers", "Dodger Stadium"),
        ("Miami Marlins", "LoanDepot Park"),
        ("Milwaukee Brewers", "American Family Field"),
        ("Minnesota Twins", "Target Field"),
        ("New York Mets", "Citi Field"),
        ("New York Yankees", "Yankee Stadium"),
        ("Athletics", "Oakland Coliseum"),
        ("Philadelphia Phillies", "Citizens Bank Park"),
        ("Pittsburgh Pirates", "PNC Park"),
        ("San Diego Padres", "Petco Park"),
        ("San Francisco Giants", "Oracle Park"),
        ("Seattle Mariners", "T-Mobile Park"),
        ("St. Louis Cardinals", "Busch Stadium"),
        ("Tampa Bay Rays", "Tropicana Field"),
        ("Texas Rangers", "Globe Life Field"),
        ("Toronto Blue Jays", "Rogers Centre"),
        ("Washington Nationals", "Nationals Park"),
    ],
    timezones: &[
        ("Arizona Diamondbacks", "America/Phoenix"),
        ("Atlanta Braves", "America/New_York"),
        ("Baltimore Orioles", "America/New_York"),
        ("Boston Red Sox", "America/New_York"),
        ("Chicago Cubs", "America/Chicago"),
        ("Chicago White Sox", "America/Chicago"),
        ("Cincinnati Reds", "America/New_York"),
        ("Cleveland Guardians", "America/New_York"),
        ("Colorado Rockies", "America/Denver"),
        ("Detroit Tigers", "America/Detroit"),
        ("Houston Astros", "America/Chicago"),
        ("Kansas City Royals", "America/Chicago"),
        ("Los Angeles Angels", "America/Los_Angeles"),
        ("Los Angeles Dodgers", "America/Los_Angeles"),
        ("Miami Marlins", "America/New_York"),
        ("Milwaukee Brewers", "America/Chicago"),
        ("Minnesota Twins", "America/Chicago"),
        ("New York Mets", "America/New_York"),
        ("New York Yankees", "America/New_York"),
        ("Athletics", "America/Los_Angeles"),
        ("Philadelphia Phillies", "America/New_York"),
        ("Pittsburgh Pirates", "America/New_York"),
        ("San Diego Padres", "America/Los_Angeles"),
        ("San Francisco Giants", "America/Los_Angeles"),
        ("Seattle Mariners", "America/Los_Angeles"),
        ("St. Louis Cardinals", "America/Chicago"),
        ("Tampa Bay Rays", "America/New_York"),
        ("Texas Rangers", "America/Chicago"),
        ("Toronto Blue Jays", "America/Toronto"),
        ("Washington Nationals", "America/New_York"),
    ],
};
