// [libs/domain/models/src/maps.rs]
//! Internal map-name translation table (spec §6 "Map name translation").

/// Translates an internal map codename to its public display name.
/// Unknown inputs pass through unchanged, per spec.
pub fn translate_map_name(internal: &str) -> String {
    match internal {
        "Baltic_Main" => "Erangel",
        "Desert_Main" => "Miramar",
        "DihorOtok_Main" => "Vikendi",
        "Savage_Main" => "Sanhok",
        "Summerland_Main" => "Karakin",
        "Chimera_Main" => "Paramo",
        "Tiger_Main" => "Taego",
        "Kiki_Main" => "Deston",
        "Neon_Main" => "Rondo",
        "Range_Main" => "Range",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_known_maps() {
        assert_eq!(translate_map_name("Baltic_Main"), "Erangel");
        assert_eq!(translate_map_name("Tiger_Main"), "Taego");
    }

    #[test]
    fn passes_through_unknown_maps() {
        assert_eq!(translate_map_name("Future_Main"), "Future_Main");
    }
}
