//! Static country reference tables.
//!
//! Flag (ISO 3166-1 alpha-2, with UK home-nation subdivisions), map
//! (alpha-3) and host-continent lookups. A missing key is a normal,
//! renderable state: callers get `None` or an empty string back.

use std::collections::HashMap;

/// Default flag image base.
pub const DEFAULT_FLAG_CDN_BASE: &str = "https://flagcdn.com/w320";

const NAME_TO_ISO2: &[(&str, &str)] = &[
    ("Germany", "de"),
    ("USA", "us"),
    ("Republic of Ireland", "ie"),
    ("Korea Republic", "kr"),
    ("South Korea", "kr"),
    ("Korea DPR", "kp"),
    ("North Korea", "kp"),
    ("IR Iran", "ir"),
    ("England", "gb-eng"),
    ("Scotland", "gb-sct"),
    ("Wales", "gb-wls"),
    ("Northern Ireland", "gb-nir"),
    ("Germany FR", "de"),
    ("Germany DR", "de"),
    ("Soviet Union", "ru"),
    ("Yugoslavia", "rs"),
    ("Czechoslovakia", "cz"),
    ("Dutch East Indies", "id"),
    ("Serbia and Montenegro", "rs"),
    ("Zaire", "cd"),
    ("Algeria", "dz"),
    ("Angola", "ao"),
    ("Argentina", "ar"),
    ("Australia", "au"),
    ("Austria", "at"),
    ("Belgium", "be"),
    ("Bolivia", "bo"),
    ("Bosnia and Herzegovina", "ba"),
    ("Brazil", "br"),
    ("Bulgaria", "bg"),
    ("Cameroon", "cm"),
    ("Canada", "ca"),
    ("Chile", "cl"),
    ("China PR", "cn"),
    ("Colombia", "co"),
    ("Costa Rica", "cr"),
    ("Cote d'Ivoire", "ci"),
    ("Côte d'Ivoire", "ci"),
    ("Croatia", "hr"),
    ("Cuba", "cu"),
    ("Czech Republic", "cz"),
    ("Denmark", "dk"),
    ("Ecuador", "ec"),
    ("Egypt", "eg"),
    ("El Salvador", "sv"),
    ("France", "fr"),
    ("Ghana", "gh"),
    ("Greece", "gr"),
    ("Haiti", "ht"),
    ("Honduras", "hn"),
    ("Hungary", "hu"),
    ("Iceland", "is"),
    ("Iran", "ir"),
    ("Iraq", "iq"),
    ("Israel", "il"),
    ("Italy", "it"),
    ("Jamaica", "jm"),
    ("Japan", "jp"),
    ("Kuwait", "kw"),
    ("Mexico", "mx"),
    ("Morocco", "ma"),
    ("Netherlands", "nl"),
    ("New Zealand", "nz"),
    ("Nigeria", "ng"),
    ("Norway", "no"),
    ("Paraguay", "py"),
    ("Peru", "pe"),
    ("Poland", "pl"),
    ("Portugal", "pt"),
    ("Romania", "ro"),
    ("Russia", "ru"),
    ("Saudi Arabia", "sa"),
    ("Senegal", "sn"),
    ("Serbia", "rs"),
    ("Slovakia", "sk"),
    ("Slovenia", "si"),
    ("South Africa", "za"),
    ("Spain", "es"),
    ("Sweden", "se"),
    ("Switzerland", "ch"),
    ("Togo", "tg"),
    ("Trinidad and Tobago", "tt"),
    ("Tunisia", "tn"),
    ("Turkey", "tr"),
    ("Ukraine", "ua"),
    ("United Arab Emirates", "ae"),
    ("Uruguay", "uy"),
];

// Several team names share one map entity (the German teams, the UK home
// nations, the Serbian successor states).
const NAME_TO_ISO3: &[(&str, &str)] = &[
    ("USA", "USA"),
    ("Uruguay", "URY"),
    ("Argentina", "ARG"),
    ("Yugoslavia", "YUG"),
    ("Chile", "CHL"),
    ("Brazil", "BRA"),
    ("France", "FRA"),
    ("Romania", "ROU"),
    ("Paraguay", "PRY"),
    ("Peru", "PER"),
    ("Belgium", "BEL"),
    ("Bolivia", "BOL"),
    ("Mexico", "MEX"),
    ("Italy", "ITA"),
    ("Czechoslovakia", "CZE"),
    ("Germany", "DEU"),
    ("West Germany", "DEU"),
    ("Germany FR", "DEU"),
    ("Austria", "AUT"),
    ("Spain", "ESP"),
    ("Hungary", "HUN"),
    ("Switzerland", "CHE"),
    ("Sweden", "SWE"),
    ("Netherlands", "NLD"),
    ("Egypt", "EGY"),
    ("Cuba", "CUB"),
    ("Norway", "NOR"),
    ("Poland", "POL"),
    ("Dutch East Indies", "IDN"),
    ("England", "GBR"),
    ("Scotland", "GBR"),
    ("Wales", "GBR"),
    ("Northern Ireland", "GBR"),
    ("Turkey", "TUR"),
    ("South Korea", "KOR"),
    ("Korea Republic", "KOR"),
    ("Soviet Union", "RUS"),
    ("Colombia", "COL"),
    ("Bulgaria", "BGR"),
    ("North Korea", "PRK"),
    ("Korea DPR", "PRK"),
    ("Portugal", "PRT"),
    ("Morocco", "MAR"),
    ("El Salvador", "SLV"),
    ("Israel", "ISR"),
    ("East Germany", "DEU"),
    ("Germany DR", "DEU"),
    ("Australia", "AUS"),
    ("Haiti", "HTI"),
    ("Zaire", "COD"),
    ("Tunisia", "TUN"),
    ("IR Iran", "IRN"),
    ("Iran", "IRN"),
    ("Algeria", "DZA"),
    ("Cameroon", "CMR"),
    ("Honduras", "HND"),
    ("Kuwait", "KWT"),
    ("New Zealand", "NZL"),
    ("Denmark", "DNK"),
    ("Iraq", "IRQ"),
    ("Canada", "CAN"),
    ("Republic of Ireland", "IRL"),
    ("Costa Rica", "CRI"),
    ("United Arab Emirates", "ARE"),
    ("Nigeria", "NGA"),
    ("Saudi Arabia", "SAU"),
    ("Russia", "RUS"),
    ("Greece", "GRC"),
    ("Croatia", "HRV"),
    ("Jamaica", "JAM"),
    ("South Africa", "ZAF"),
    ("Japan", "JPN"),
    ("FR Yugoslavia", "YUG"),
    ("Senegal", "SEN"),
    ("Slovenia", "SVN"),
    ("Ecuador", "ECU"),
    ("China PR", "CHN"),
    ("Trinidad and Tobago", "TTO"),
    ("Ivory Coast", "CIV"),
    ("Cote d'Ivoire", "CIV"),
    ("Côte d'Ivoire", "CIV"),
    ("Angola", "AGO"),
    ("Czech Republic", "CZE"),
    ("Ghana", "GHA"),
    ("Togo", "TGO"),
    ("Ukraine", "UKR"),
    ("Serbia and Montenegro", "SRB"),
    ("Serbia", "SRB"),
    ("Slovakia", "SVK"),
    ("Bosnia and Herzegovina", "BIH"),
    ("Iceland", "ISL"),
    ("Panama", "PAN"),
    ("Qatar", "QAT"),
];

const HOST_TO_CONTINENT: &[(&str, &str)] = &[
    ("Uruguay", "South America"),
    ("Italy", "Europe"),
    ("France", "Europe"),
    ("Brazil", "South America"),
    ("Switzerland", "Europe"),
    ("Sweden", "Europe"),
    ("Chile", "South America"),
    ("England", "Europe"),
    ("Mexico", "North America"),
    ("Germany", "Europe"),
    ("Germany FR", "Europe"),
    ("West Germany", "Europe"),
    ("Argentina", "South America"),
    ("Spain", "Europe"),
    ("USA", "North America"),
    ("Korea/Japan", "Asia"),
    ("South Africa", "Africa"),
    ("Russia", "Europe"),
    ("Qatar", "Asia"),
];

/// Read-only country lookups, built once and shared with the store.
#[derive(Debug, Clone)]
pub struct ReferenceLookups {
    iso2: HashMap<String, String>,
    iso3: HashMap<String, String>,
    continent: HashMap<String, String>,
    flag_cdn_base: String,
}

impl ReferenceLookups {
    /// Build the built-in tables with flags served from `flag_cdn_base`.
    pub fn builtin(flag_cdn_base: &str) -> Self {
        fn table(pairs: &[(&str, &str)]) -> HashMap<String, String> {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        }

        Self {
            iso2: table(NAME_TO_ISO2),
            iso3: table(NAME_TO_ISO3),
            continent: table(HOST_TO_CONTINENT),
            flag_cdn_base: flag_cdn_base.trim_end_matches('/').to_string(),
        }
    }

    /// Lowercase flag code for a country name.
    pub fn country_to_iso2(&self, name: &str) -> Option<&str> {
        self.iso2.get(name.trim()).map(String::as_str)
    }

    /// Map entity code; aliases share one code.
    pub fn country_to_iso_code(&self, name: &str) -> Option<&str> {
        self.iso3.get(name.trim()).map(String::as_str)
    }

    pub fn country_to_continent(&self, name: &str) -> Option<&str> {
        self.continent.get(name.trim()).map(String::as_str)
    }

    /// Flag image URL, or an empty string when the country is unknown.
    pub fn country_to_flag_url(&self, name: &str) -> String {
        match self.country_to_iso2(name) {
            Some(code) => format!("{}/{}.png", self.flag_cdn_base, code),
            None => String::new(),
        }
    }
}

impl Default for ReferenceLookups {
    fn default() -> Self {
        Self::builtin(DEFAULT_FLAG_CDN_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_url_known_country() {
        let lookups = ReferenceLookups::default();
        assert_eq!(
            lookups.country_to_flag_url("Brazil"),
            "https://flagcdn.com/w320/br.png"
        );
        assert_eq!(
            lookups.country_to_flag_url(" England "),
            "https://flagcdn.com/w320/gb-eng.png"
        );
    }

    #[test]
    fn test_flag_url_unknown_is_empty() {
        let lookups = ReferenceLookups::default();
        assert_eq!(lookups.country_to_flag_url("Atlantis"), "");
        assert_eq!(lookups.country_to_iso_code("Atlantis"), None);
        assert_eq!(lookups.country_to_continent("Atlantis"), None);
    }

    #[test]
    fn test_aliases_share_iso_code() {
        let lookups = ReferenceLookups::default();
        assert_eq!(lookups.country_to_iso_code("Germany FR"), Some("DEU"));
        assert_eq!(lookups.country_to_iso_code("Germany"), Some("DEU"));
        assert_eq!(lookups.country_to_iso_code("Scotland"), Some("GBR"));
        assert_eq!(lookups.country_to_iso_code("Wales"), Some("GBR"));
    }

    #[test]
    fn test_custom_cdn_base() {
        let lookups = ReferenceLookups::builtin("http://localhost/flags/");
        assert_eq!(
            lookups.country_to_flag_url("Italy"),
            "http://localhost/flags/it.png"
        );
    }

    #[test]
    fn test_continent() {
        let lookups = ReferenceLookups::default();
        assert_eq!(lookups.country_to_continent("Korea/Japan"), Some("Asia"));
        assert_eq!(lookups.country_to_continent("USA"), Some("North America"));
    }
}
