//! Word lists the entity factories draw from.

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Carlos", "Karen", "Daniel", "Lisa", "Matthew", "Nancy", "Anthony", "Betty", "Mark", "Sandra",
    "Steven", "Ashley", "Andrew", "Emily", "Kevin", "Michelle", "Brian", "Amanda", "Priya", "Wei",
    "Ahmed", "Sofia",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Nguyen", "Patel", "Kim", "Chen",
];

pub const STREET_NAMES: &[&str] = &[
    "Main St", "Oak Ave", "Maple Dr", "Cedar Ln", "Elm St", "Pine Rd", "Washington Blvd",
    "Lakeview Dr", "Park Ave", "Sunset Blvd", "River Rd", "Hillcrest Dr", "Highland Ave",
    "Commerce Pkwy", "Industrial Way", "Auto Mall Dr",
];

/// (city, state, zip prefix)
pub const CITIES: &[(&str, &str, &str)] = &[
    ("Springfield", "IL", "627"),
    ("Austin", "TX", "787"),
    ("Denver", "CO", "802"),
    ("Phoenix", "AZ", "850"),
    ("Columbus", "OH", "432"),
    ("Nashville", "TN", "372"),
    ("Raleigh", "NC", "276"),
    ("Sacramento", "CA", "958"),
    ("Portland", "OR", "972"),
    ("Tampa", "FL", "336"),
    ("Madison", "WI", "537"),
    ("Boise", "ID", "837"),
];

pub const EMAIL_DOMAINS: &[&str] = &[
    "example.com", "mail.example.org", "inbox.example.net", "example.io",
];

pub const STORE_PREFIXES: &[&str] = &[
    "Metro", "Valley", "Summit", "Lakeside", "Capital", "Riverside", "Heritage", "Pinnacle",
    "Gateway", "Northside",
];

pub const LEGAL_SUFFIXES: &[&str] = &["LLC", "Inc.", "Motors LLC", "Automotive Group, Inc."];

/// (make, models)
pub const MAKES: &[(&str, &[&str])] = &[
    ("Toyota", &["Camry", "Corolla", "RAV4", "Highlander", "Tacoma", "Tundra"]),
    ("Honda", &["Civic", "Accord", "CR-V", "Pilot", "Odyssey"]),
    ("Ford", &["F-150", "Escape", "Explorer", "Mustang", "Bronco"]),
    ("Chevrolet", &["Silverado", "Equinox", "Malibu", "Tahoe", "Traverse"]),
    ("Nissan", &["Altima", "Rogue", "Sentra", "Pathfinder", "Frontier"]),
    ("Hyundai", &["Elantra", "Tucson", "Santa Fe", "Palisade"]),
    ("Subaru", &["Outback", "Forester", "Crosstrek", "Ascent"]),
];

pub const COLORS: &[&str] = &[
    "Super White", "Midnight Black", "Silver Metallic", "Magnetic Gray", "Ruby Red",
    "Blueprint", "Cement", "Pearl White", "Army Green", "Sunset Orange",
];

pub const ENGINES: &[&str] = &[
    "1.5L I4 Turbo", "2.0L I4", "2.5L I4", "2.5L I4 Hybrid", "3.5L V6", "2.7L V6 EcoBoost",
    "5.3L V8", "5.7L V8", "Dual Motor Electric",
];

pub const TRANSMISSIONS: &[&str] = &[
    "6-Speed Manual", "6-Speed Automatic", "8-Speed Automatic", "10-Speed Automatic", "CVT",
    "Single-Speed Direct Drive",
];

pub const FUEL_TYPES: &[&str] = &["Gasoline", "Hybrid", "Plug-in Hybrid", "Diesel", "Electric"];

pub const BODY_STYLES: &[&str] = &[
    "Sedan", "SUV", "Crossover", "Pickup Truck", "Coupe", "Minivan", "Hatchback",
];

pub const SERVICE_CONCERNS: &[&str] = &[
    "Oil change and multi-point inspection",
    "Check engine light is on",
    "Brakes squeal when stopping",
    "Tire rotation and balance",
    "A/C not blowing cold",
    "Vibration at highway speed",
    "Battery slow to crank",
    "Scheduled 30k mile maintenance",
    "Recall campaign",
    "Windshield wiper replacement",
    "Transmission shifts hard",
    "Noise from front suspension",
];

/// Characters allowed in a VIN (no I, O or Q)
pub const VIN_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";

pub const LICENSE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPRSTUVWXYZ";
