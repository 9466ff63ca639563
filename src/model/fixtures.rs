//! Mock record set served by the resolver and the REST route

use super::artist::{Artist, Category, Language};

/// The fixed in-memory artist roster
pub fn artists() -> Vec<Artist> {
    vec![
        Artist::new("1", "Luna Rivera")
            .with_categories([Category::Singer])
            .with_location("New York")
            .with_price(500, 1000)
            .with_bio("Soul and jazz vocalist with a decade of club residencies.")
            .with_image("/images/artists/luna-rivera.jpg")
            .with_languages([Language::English, Language::Spanish]),
        Artist::new("2", "DJ Pulse")
            .with_categories([Category::Dj])
            .with_location("Boston")
            .with_price(2000, 3000)
            .with_bio("House and techno sets for weddings, galas and festivals.")
            .with_image("/images/artists/dj-pulse.jpg")
            .with_languages([Language::English]),
        Artist::new("3", "The Brass Tacks")
            .with_categories([Category::Band, Category::Instrumentalist])
            .with_location("New Orleans")
            .with_price(1500, 4000)
            .with_bio("Eight-piece brass band playing second line and funk.")
            .with_languages([Language::English, Language::French]),
        Artist::new("4", "Marco Bellini")
            .with_categories([Category::Comedian])
            .with_location("Chicago")
            .with_price(800, 1800)
            .with_bio("Observational stand-up, clean sets available on request.")
            .with_image("/images/artists/marco-bellini.jpg")
            .with_languages([Language::English, Language::Italian]),
        Artist::new("5", "Aiko Tanaka")
            .with_categories([Category::Dancer])
            .with_location("Los Angeles")
            .with_price(1200, 2500)
            .with_bio("Contemporary and hip-hop choreography for stage and video.")
            .with_image("https://cdn.stagebook.example/aiko-tanaka.jpg")
            .with_languages([Language::English, Language::Japanese]),
        Artist::new("6", "The Great Zoltan")
            .with_categories([Category::Magician])
            .with_location("Newark")
            .with_price(300, 900)
            .with_bio("Close-up magic and mentalism for corporate events.")
            .with_languages([Language::English, Language::German]),
        Artist::new("7", "Sofia Costa")
            .with_categories([Category::Singer, Category::Instrumentalist])
            .with_location("Miami")
            .with_price(900, 2200)
            .with_bio("Bossa nova singer and guitarist.")
            .with_image("/images/artists/sofia-costa.jpg")
            .with_languages([Language::Portuguese, Language::Spanish, Language::English]),
        Artist::new("8", "Neon Collective")
            .with_categories([Category::Band, Category::Dj])
            .with_location("Austin")
            .with_price(2500, 5000)
            .with_bio("Live electronic act blending synths, drums and DJ sets.")
            .with_languages([Language::English]),
        Artist::new("9", "Mei Lin")
            .with_categories([Category::Instrumentalist])
            .with_location("San Francisco")
            .with_price(700, 1600)
            .with_bio("Classical pianist and erhu player for receptions.")
            .with_image("/images/artists/mei-lin.jpg")
            .with_languages([Language::Mandarin, Language::English]),
        Artist::new("10", "Camille Laurent")
            .with_categories([Category::Singer, Category::Dancer])
            .with_location("New York")
            .with_price(1800, 3500)
            .with_bio("Cabaret performer, vocals and burlesque choreography.")
            .with_languages([Language::French, Language::English]),
    ]
}
