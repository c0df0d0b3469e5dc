use super::{LeagueProfile, SourceShape};

pub(super) static NHL: LeagueProfile = LeagueProfile {
    key: "nhl",
    label: "NHL",
    shape: SourceShape::DatedTables,
    url_template: "https://www.espn.com/nhl/schedule/_/date/{date}",
    team_codes: &[],
    completeness_threshold: 0,
    aliases: &[
        ("Anaheim", "Anaheim Ducks"),
        ("Arizona", "Arizona Coyotes"),
        ("Boston", "Boston Bruins"),
        ("Buffalo", "Buffalo Sabres"),
        ("Calgary", "Calgary Flames"),
        ("Carolina", "Carolina Hurricanes"),
        ("Chicago", "Chicago Blackhawks"),
        ("Colorado", "Colorado Avalanche"),
        ("Columbus", "Columbus Blue Jackets"),
        ("Dallas", "Dallas Stars"),
        ("Detroit", "Detroit Red Wings"),
        ("Edmonton", "Edmonton Oilers"),
        ("Florida", "Florida Panthers"),
        ("Los Angeles", "Los Angeles Kings"),
        ("Minnesota", "Minnesota Wild"),
        ("Montreal", "Montreal Canadiens"),
        ("Nashville", "Nashville Predators"),
        ("New Jersey", "New Jersey Devils"),
        ("NY Islanders", "New York Islanders"),
        ("NY Rangers", "New York Rangers"),
        ("Ottawa", "Ottawa Senators"),
        ("Philadelphia", "Philadelphia Flyers"),
        ("Pittsburgh", "Pittsburgh Penguins"),
        ("San Jose", "San Jose Sharks"),
        ("Seattle", "Seattle Kraken"),
        ("St. Louis", "St. Louis Blues"),
        ("Tampa Bay", "Tampa Bay Lightning"),
        ("Toronto", "Toronto Maple Leafs"),
        ("Vancouver", "Vancouver Canucks"),
        ("Vegas", "Vegas Golden Knights"),
        ("Washington", "Washington Capitals"),
        ("Winnipeg", "Winnipeg Jets"),
    ],
    venues: &[
        ("Anaheim Ducks", "Honda Center"),
        ("Arizona Coyotes", "Mullett Arena"),
        ("Boston Bruins", "TD Garden"),
        ("Buffalo Sabres", "KeyBank Center"),
        ("Calgary Flames", "Scotiabank Saddledome"),
        ("Carolina Hurricanes", "PNC Arena"),
        ("Chicago Blackhawks", "United Center"),
        ("Colorado Avalanche", "Ball Arena"),
        ("Columbus Blue Jackets", "Nationwide Arena"),
        ("Dallas Stars", "American Airlines Center"),
        ("Detroit Red Wings", "Little Caesars Arena"),
        ("Edmonton Oilers", "Rogers Place"),
        ("Florida Panthers", "Amerant Bank Arena"),
        ("Los Angeles Kings", "Crypto.com Arena"),
        ("Minnesota Wild", "Xcel Energy Center"),
        ("Montreal Canadiens", "Bell Centre"),
        ("Nashville Predators", "Bridgestone Arena"),
        ("New Jersey Devils", "Prudential Center"),
        ("New York Islanders", "UBS Arena"),
        ("New York Rangers", "Madison Square Garden"),
        ("Ottawa Senators", "Canadian Tire Centre"),
        ("Philadelphia Flyers", "Wells Fargo Center"),
        ("Pittsburgh Penguins", "PPG Paints Arena"),
        ("San Jose Sharks", "SAP Center"),
        ("Seattle Kraken", "Climate Pledge Arena"),
        ("St. Louis Blues", "Enterprise Center"),
        ("Tampa Bay Lightning", "Amalie Arena"),
        ("Toronto Maple Leafs", "Scotiabank Arena"),
        ("Vancouver Canucks", "Rogers Arena"),
        ("Vegas Golden Knights", "T-Mobile Arena"),
        ("Washington Capitals", "Capital One Arena"),
        ("Winnipeg Jets", "Canada Life Centre"),
    ],
    timezones: &[
        ("Anaheim Ducks", "America/Los_Angeles"),
        ("Arizona Coyotes", "America/Phoenix"),
        ("Boston Bruins", "America/New_York"),
        ("Buffalo Sabres", "America/New_York"),
        ("Calgary Flames", "America/Edmonton"),
        ("Carolina Hurricanes", "America/New_York"),
        ("Chicago Blackhawks", "America/Chicago"),
        ("Colorado Avalanche", "America/Denver"),
        ("Columbus Blue Jackets", "America/New_York"),
        ("Dallas Stars", "America/Chicago"),
        ("Detroit Red Wings", "America/Detroit"),
        ("Edmonton Oilers", "America/Edmonton"),
        ("Florida Panthers", "America/New_York"),
        ("Los Angeles Kings", "America/Los_Angeles"),
        ("Minnesota Wild", "America/Chicago"),
        ("Montreal Canadiens", "America/Toronto"),
        ("Nashville Predators", "America/Chicago"),
        ("New Jersey Devils", "America/New_York"),
        ("New York Islanders", "America/New_York"),
        ("New York Rangers", "America/New_York"),
        ("Ottawa Senators", "America/Toronto"),
        ("Philadelphia Flyers", "America/New_York"),
        ("Pittsburgh Penguins", "America/New_York"),
        ("San Jose Sharks", "America/Los_Angeles"),
        ("Seattle Kraken", "America/Los_Angeles"),
        ("St. Louis Blues", "America/Chicago"),
        ("Tampa Bay Lightning", "America/New_York"),
        ("Toronto Maple Leafs", "America/Toronto"),
        ("Vancouver Canucks", "America/Vancouver"),
        ("Vegas Golden Knights", "America/Los_Angeles"),
        ("Washington Capitals", "America/New_York"),
        ("Winnipeg Jets", "America/Winnipeg"),
    ],
};
