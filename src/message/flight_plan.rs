use super::{has_min_tokens, Envelope, FsdMessage};
use crate::enums::FlightType;
use crate::serializer::{from_wire, parse_int, to_wire};

/// `$FP` flight plan filed by a pilot or amended by a controller
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FlightPlan {
    envelope: Envelope,
    pub flight_type: FlightType,
    pub aircraft_icao: String,
    pub true_cruising_speed: i32,
    pub departure_airport: String,
    pub estimated_departure_time: String,
    pub actual_departure_time: String,
    pub cruise_altitude: String,
    pub destination_airport: String,
    pub hours_enroute: i32,
    pub minutes_enroute: i32,
    pub hours_fuel: i32,
    pub minutes_fuel: i32,
    pub alternate_airport: String,
    pub remarks: String,
    pub route: String,
}

impl FlightPlan {
    /// Empty plan addressed from `sender` to `receiver`, filled in field by field
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            envelope: Envelope::with_receiver(sender, receiver),
            ..Self::default()
        }
    }
}

impl FsdMessage for FlightPlan {
    const PDU: &'static str = "$FP";

    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn to_tokens(&self) -> Vec<String> {
        vec![
            self.sender().to_string(),
            self.receiver().to_string(),
            to_wire(&self.flight_type),
            self.aircraft_icao.clone(),
            self.true_cruising_speed.to_string(),
            self.departure_airport.clone(),
            self.estimated_departure_time.clone(),
            self.actual_departure_time.clone(),
            self.cruise_altitude.clone(),
            self.destination_airport.clone(),
            self.hours_enroute.to_string(),
            self.minutes_enroute.to_string(),
            self.hours_fuel.to_string(),
            self.minutes_fuel.to_string(),
            self.alternate_airport.clone(),
            self.remarks.clone(),
            self.route.clone(),
        ]
    }

    fn from_tokens(tokens: &[&str]) -> Self {
        if !has_min_tokens(tokens, 17, "FlightPlan", log::Level::Debug) {
            return Self::default();
        }
        Self {
            flight_type: from_wire(tokens[2]),
            aircraft_icao: tokens[3].to_string(),
            true_cruising_speed: parse_int(tokens[4]),
            departure_airport: tokens[5].to_string(),
            estimated_departure_time: tokens[6].to_string(),
            actual_departure_time: tokens[7].to_string(),
            cruise_altitude: tokens[8].to_string(),
            destination_airport: tokens[9].to_string(),
            hours_enroute: parse_int(tokens[10]),
            minutes_enroute: parse_int(tokens[11]),
            hours_fuel: parse_int(tokens[12]),
            minutes_fuel: parse_int(tokens[13]),
            alternate_airport: tokens[14].to_string(),
            remarks: tokens[15].to_string(),
            route: tokens[16].to_string(),
            ..Self::new(tokens[0], tokens[1])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str =
        "ABCD:SERVER:V:B744:420:EGLL:1530:1535:FL350:KORD:8:15:9:30:NONE:Unit Test:EGLL.KORD";

    #[test]
    fn test_flight_plan() {
        let mut plan = FlightPlan::new("ABCD", "SERVER");
        plan.flight_type = FlightType::Vfr;
        plan.aircraft_icao = "B744".to_string();
        plan.true_cruising_speed = 420;
        plan.departure_airport = "EGLL".to_string();
        plan.estimated_departure_time = "1530".to_string();
        plan.actual_departure_time = "1535".to_string();
        plan.cruise_altitude = "FL350".to_string();
        plan.destination_airport = "KORD".to_string();
        plan.hours_enroute = 8;
        plan.minutes_enroute = 15;
        plan.hours_fuel = 9;
        plan.minutes_fuel = 30;
        plan.alternate_airport = "NONE".to_string();
        plan.remarks = "Unit Test".to_string();
        plan.route = "EGLL.KORD".to_string();

        assert_eq!(plan.to_tokens().join(":"), REFERENCE);
        let tokens: Vec<&str> = REFERENCE.split(':').collect();
        assert_eq!(FlightPlan::from_tokens(&tokens), plan);
    }

    #[test]
    fn test_flight_plan_too_short() {
        let tokens: Vec<&str> = REFERENCE.split(':').take(16).collect();
        assert!(!FlightPlan::from_tokens(&tokens).is_valid());
    }
}
