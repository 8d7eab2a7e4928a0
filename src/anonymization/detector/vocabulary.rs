//! Word lists used by the heuristic detectors
//!
//! All lookups are case-insensitive; entries are stored lowercase.

/// Honorifics and judicial titles that precede a personal name
pub const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "miss", "mx", "dr", "prof", "professor", "sir", "dame", "lord", "lady",
    "judge", "justice", "hhj", "rev", "master",
];

/// Capitalised words that are never part of a personal name in legal prose
///
/// Sentence openers, legal role nouns, calendar words and jurisdiction names.
pub const COMMON_WORDS: &[&str] = &[
    // determiners, pronouns, connectives
    "a", "an", "the", "this", "that", "these", "those", "it", "its", "he", "she", "they",
    "his", "her", "their", "we", "our", "you", "your", "i", "my", "and", "or", "but", "if",
    "in", "on", "at", "by", "for", "from", "of", "to", "with", "as", "upon", "under", "after",
    "before", "between", "during", "following", "pursuant", "whereas", "where", "when", "which",
    "who", "whom", "whose", "all", "any", "each", "every", "no", "not", "none", "some", "such",
    "there", "here", "then", "thus", "also", "however", "therefore", "further", "furthermore",
    "dear", "yours", "regards", "sincerely", "faithfully", "re", "ref", "subject", "attn",
    // legal roles and document nouns
    "claimant", "claimants", "defendant", "defendants", "appellant", "respondent", "applicant",
    "petitioner", "plaintiff", "party", "parties", "court", "tribunal", "judgment", "order",
    "agreement", "contract", "deed", "lease", "licence", "license", "schedule", "clause",
    "section", "article", "part", "paragraph", "appendix", "annex", "exhibit", "recital",
    "act", "regulation", "regulations", "rules", "statute", "company", "companies", "seller",
    "buyer", "purchaser", "vendor", "supplier", "customer", "client", "tenant", "landlord",
    "lessor", "lessee", "employer", "employee", "director", "directors", "board", "trustee",
    "executor", "guarantor", "lender", "borrower", "licensor", "licensee", "counsel",
    "solicitor", "solicitors", "barrister", "witness", "statement", "claim", "case", "appeal",
    "application", "evidence", "notice", "letter", "email", "tel", "phone", "fax", "date",
    "name", "address", "signed", "signature", "dated", "total", "amount", "page", "note",
    "confidential", "privileged", "private", "strictly", "without", "prejudice", "draft",
    "final", "terms", "conditions", "definitions", "interpretation", "general", "limited",
    "ltd", "plc", "llp", "inc", "llc", "group", "holdings", "partners", "bank", "trust",
    "data", "protection", "human", "rights", "intellectual", "property", "privacy",
    "information", "services", "financial", "conduct", "authority", "civil", "procedure",
    "criminal", "law", "legal", "consumer", "insolvency", "arbitration", "tax", "revenue",
    "customs", "health", "safety", "housing", "planning", "equality", "competition", "markets",
    // courts and institutions
    "high", "supreme", "crown", "county", "magistrates", "appeal", "chancery", "division",
    "queen", "king", "bench", "family", "commercial", "employment", "his", "majesty",
    "honour", "honourable", "government", "ministry", "department", "council", "secretary",
    "state", "police", "service", "office", "house", "commons", "parliament",
    // calendar
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "january",
    "february", "march", "april", "may", "june", "july", "august", "september", "october",
    "november", "december",
    // jurisdictions
    "england", "wales", "scotland", "ireland", "northern", "united", "kingdom", "states",
    "america", "european", "union", "british", "english", "welsh", "scottish",
    // currency words
    "pounds", "sterling", "dollars", "euros",
];

/// Common given names; a capitalised pair starting with one of these is very
/// likely a person
pub const FIRST_NAMES: &[&str] = &[
    "adam", "alan", "alice", "amanda", "amy", "andrew", "angela", "anna", "anne", "anthony",
    "barbara", "ben", "benjamin", "brian", "carol", "catherine", "charles", "charlotte",
    "chris", "christopher", "claire", "daniel", "david", "deborah", "edward", "elizabeth",
    "emily", "emma", "frank", "gary", "george", "graham", "hannah", "harry", "helen", "ian",
    "jack", "james", "jane", "jason", "jennifer", "jessica", "joan", "john", "jonathan",
    "joseph", "julia", "karen", "kate", "katherine", "kevin", "laura", "linda", "lisa",
    "louise", "lucy", "margaret", "maria", "mark", "martin", "mary", "matthew", "michael",
    "michelle", "nicholas", "nicola", "oliver", "patricia", "paul", "peter", "rachel",
    "rebecca", "richard", "robert", "ruth", "sarah", "simon", "sophie", "stephen", "steven",
    "susan", "thomas", "timothy", "victoria", "william",
];

/// First words that usually open a place name ("New York", "Port Talbot")
pub const PLACE_PREFIXES: &[&str] = &[
    "new", "north", "south", "east", "west", "upper", "lower", "great", "greater", "little",
    "san", "santa", "los", "las", "saint", "st", "port", "fort", "mount", "lake", "isle",
];

/// Last words that usually close a place or address name
pub const PLACE_SUFFIXES: &[&str] = &[
    "street", "road", "avenue", "lane", "drive", "way", "close", "crescent", "terrace",
    "place", "square", "gardens", "park", "hill", "heights", "green", "bridge", "valley",
    "city", "town", "village", "county", "shire", "borough", "district", "island", "islands",
    "bay", "beach", "harbour", "wood", "field", "fields", "cross", "common", "quay", "wharf",
];

/// Gazetteer of major cities detected as locations in their own right
pub const KNOWN_PLACES: &[&str] = &[
    "London", "Manchester", "Birmingham", "Leeds", "Liverpool", "Bristol", "Sheffield",
    "Newcastle", "Nottingham", "Leicester", "Southampton", "Cardiff", "Swansea", "Glasgow",
    "Edinburgh", "Aberdeen", "Belfast", "Dublin", "Oxford", "Cambridge", "Brighton",
    "New York", "Los Angeles", "San Francisco", "Chicago", "Boston", "Washington", "Toronto",
    "Paris", "Berlin", "Madrid", "Rome", "Amsterdam", "Brussels", "Luxembourg", "Geneva",
    "Zurich", "Hong Kong", "Singapore", "Dubai", "Sydney", "Melbourne",
];

/// Abbreviations whose trailing full stop does not end a sentence
pub const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "st", "no", "nos", "v", "vs", "cf", "e.g", "i.e", "para",
    "paras", "art", "sec", "cl", "pp", "hhj",
];

fn contains(list: &[&str], word: &str) -> bool {
    let lower = word.to_lowercase();
    list.iter().any(|entry| *entry == lower)
}

/// Whether a word is an honorific or judicial title (trailing '.' ignored)
pub fn is_title(word: &str) -> bool {
    contains(TITLES, word.trim_end_matches('.'))
}

/// Whether a capitalised word is ordinary legal vocabulary
pub fn is_common_word(word: &str) -> bool {
    contains(COMMON_WORDS, word)
}

/// Whether a word is a common given name
pub fn is_first_name(word: &str) -> bool {
    contains(FIRST_NAMES, word)
}

/// Whether a sequence of words looks like a place name rather than a person
pub fn looks_like_place(words: &[&str]) -> bool {
    let (Some(first), Some(last)) = (words.first(), words.last()) else {
        return false;
    };
    if contains(PLACE_PREFIXES, first) || contains(PLACE_SUFFIXES, last) {
        return true;
    }
    let joined = words.join(" ");
    KNOWN_PLACES
        .iter()
        .any(|place| place.eq_ignore_ascii_case(&joined) || words.iter().any(|w| w == place))
}

/// Whether a word followed by '.' is an abbreviation rather than a sentence end
pub fn is_abbreviation(word: &str) -> bool {
    contains(ABBREVIATIONS, word)
}
