//! Fun commands: fortune, cowsay, weather.

use orbit_platform::RandomExt;
use orbit_types::error::Result;
use orbit_types::output::TextSegment;

use crate::interpreter::{Command, CommandResult, Environment};

// ---------------------------------------------------------------------------
// fortune
// ---------------------------------------------------------------------------

const FORTUNES: [&str; 5] = [
    "You will find a hidden treasure where you least expect it.",
    "A beautiful, smart, and loving person will be coming into your life.",
    "Your hard work is about to pay off.",
    "A faithful friend is a strong defense.",
    "A fresh start will put you on your way.",
];

struct FortuneCmd;
impl Command for FortuneCmd {
    fn name(&self) -> &str {
        "fortune"
    }
    fn description(&self) -> &str {
        "Get a random fortune message"
    }
    fn usage(&self) -> &str {
        "fortune"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &str, env: &mut Environment<'_>) -> Result<CommandResult> {
        Ok(CommandResult::Immediate(vec![
            TextSegment::highlight("Fortune says:"),
            TextSegment::plain(*env.rng.pick(&FORTUNES)),
        ]))
    }
}

// ---------------------------------------------------------------------------
// cowsay
// ---------------------------------------------------------------------------

const COW_ART: &str = r"        \   ^__^
         \  (oo)\_______
            (__)\       )\/\
                ||----w |
                ||     ||";

struct CowsayCmd;
impl Command for CowsayCmd {
    fn name(&self) -> &str {
        "cowsay"
    }
    fn description(&self) -> &str {
        "Display a cow saying your message"
    }
    fn usage(&self) -> &str {
        "cowsay [text]"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, args: &str, _env: &mut Environment<'_>) -> Result<CommandResult> {
        let message = args.trim();
        let message = if message.is_empty() { "Moo!" } else { message };
        let width = message.chars().count() + 2;
        let bubble = format!(
            " {} \n< {message} >\n {} ",
            "_".repeat(width),
            "-".repeat(width),
        );
        Ok(CommandResult::Immediate(vec![TextSegment::plain(format!(
            "{bubble}\n{COW_ART}"
        ))
        .preformatted()]))
    }
}

// ---------------------------------------------------------------------------
// weather
// ---------------------------------------------------------------------------

const LOCATIONS: [(&str, &str); 5] = [
    ("Tokyo", "Japan"),
    ("London", "UK"),
    ("New York", "USA"),
    ("Sydney", "Australia"),
    ("Bucharest", "Romania"),
];

const CONDITIONS: [&str; 10] = [
    "Clear skies",
    "Partly cloudy",
    "Overcast",
    "Light rain",
    "Heavy rain",
    "Thunderstorm",
    "Foggy",
    "Snowing",
    "Sunny",
    "Windy",
];

struct WeatherCmd;
impl Command for WeatherCmd {
    fn name(&self) -> &str {
        "weather"
    }
    fn description(&self) -> &str {
        "Shows weather information"
    }
    fn usage(&self) -> &str {
        "weather"
    }
    fn category(&self) -> &str {
        "fun"
    }
    fn execute(&self, _args: &str, env: &mut Environment<'_>) -> Result<CommandResult> {
        let rng = env.rng;
        let (city, country) = rng.pick(&LOCATIONS);
        let condition = rng.pick(&CONDITIONS);
        let temperature = rng.range_i64(-10, 40);
        let humidity = rng.range_i64(20, 95);
        let wind = rng.range_i64(0, 50);
        Ok(CommandResult::Immediate(vec![
            TextSegment::highlight("Current Weather:"),
            TextSegment::plain(format!("Location: {city}, {country}")),
            TextSegment::plain(format!("Temperature: {temperature}\u{b0}C")),
            TextSegment::plain(format!("Condition: {condition}")),
            TextSegment::plain(format!("Humidity: {humidity}%")),
            TextSegment::plain(format!("Wind Speed: {wind} km/h")),
        ]))
    }
}

/// Register fun commands.
pub fn register_fun_commands(reg: &mut crate::CommandRegistry) {
    reg.register(Box::new(FortuneCmd));
    reg.register(Box::new(CowsayCmd));
    reg.register(Box::new(WeatherCmd));
}
