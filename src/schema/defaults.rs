//! Built-in default schema.
//!
//! The store bootstraps these definitions on first access so a fresh
//! installation has a usable vehicle schema without any configuration.
//! Option lists deliberately omit the empty "Select ..." placeholder; the
//! render layer owns placeholders and empty option values are dropped by
//! sanitization anyway.

use std::collections::BTreeMap;

use crate::schema::field::{FieldDefinition, NumericBounds, SelectOption, TypeSettings};
use crate::schema::group::{GroupContext, GroupDefinition, GroupPriority};

/// The eight built-in field groups
#[must_use]
pub fn default_groups() -> Vec<GroupDefinition> {
    vec![
        GroupDefinition::new("specifications", "Specifications", 1),
        GroupDefinition::new("pricing", "Pricing", 2),
        GroupDefinition::new("colors", "Colors", 3),
        GroupDefinition::new("drive", "Drive Information", 4),
        GroupDefinition::new("performance", "Performance", 5).with_priority(GroupPriority::Default),
        GroupDefinition::new("measurements", "Measurements", 6).with_priority(GroupPriority::Default),
        GroupDefinition::new("features", "Features", 7).with_priority(GroupPriority::Default),
        GroupDefinition::new("photos", "Photos", 8)
            .with_context(GroupContext::Side)
            .with_priority(GroupPriority::Default),
    ]
}

/// The built-in field definitions, already in position order
#[must_use]
pub fn default_fields() -> Vec<FieldDefinition> {
    let mut fields = vec![
        // Specifications
        text("vin", "VIN", "specifications", "Vehicle Identification Number", 1).required(),
        number(
            "year",
            "Year",
            "specifications",
            "Model Year",
            2,
            NumericBounds {
                min: 1900.0,
                max: Some(2050.0),
                step: 1.0,
            },
        )
        .required(),
        text("make", "Make", "specifications", "Vehicle Manufacturer", 3).required(),
        text("model", "Model", "specifications", "Vehicle Model", 4).required(),
        text("trim", "Trim", "specifications", "Trim Level", 5),
        text("stock_number", "Stock Number", "specifications", "Dealer Stock Number", 6),
        select(
            "body_class",
            "Body Class",
            "specifications",
            "Vehicle Body Style",
            7,
            &[
                ("sedan", "Sedan"),
                ("coupe", "Coupe"),
                ("hatchback", "Hatchback"),
                ("wagon", "Wagon"),
                ("suv", "SUV"),
                ("crossover", "Crossover"),
                ("truck", "Truck"),
                ("van", "Van"),
                ("minivan", "Minivan"),
                ("convertible", "Convertible"),
                ("roadster", "Roadster"),
                ("pickup", "Pickup Truck"),
            ],
        ),
        // Pricing
        currency("price", "Price", "Asking Price", 1),
        currency("sales_price", "Sales Price", "Discounted Sales Price", 2),
        currency("msrp", "MSRP", "Manufacturer Suggested Retail Price", 3),
        // Colors
        select(
            "exterior_color",
            "Exterior Color",
            "colors",
            "Exterior Paint Color",
            1,
            &[
                ("black", "Black"),
                ("white", "White"),
                ("silver", "Silver"),
                ("gray", "Gray"),
                ("blue", "Blue"),
                ("red", "Red"),
                ("green", "Green"),
                ("brown", "Brown"),
                ("gold", "Gold"),
                ("yellow", "Yellow"),
                ("orange", "Orange"),
                ("purple", "Purple"),
                ("maroon", "Maroon"),
                ("tan", "Tan"),
                ("beige", "Beige"),
            ],
        )
        .ai_fillable(),
        select(
            "interior_color",
            "Interior Color",
            "colors",
            "Interior Upholstery Color",
            2,
            &[
                ("black", "Black"),
                ("gray", "Gray"),
                ("beige", "Beige"),
                ("tan", "Tan"),
                ("brown", "Brown"),
                ("white", "White"),
                ("red", "Red"),
                ("blue", "Blue"),
                ("cream", "Cream"),
                ("charcoal", "Charcoal"),
            ],
        )
        .ai_fillable(),
        // Drive Information
        text(
            "engine_configuration",
            "Engine Configuration",
            "drive",
            "Engine Type Configuration",
            1,
        )
        .ai_fillable(),
        select(
            "drive_type",
            "Drive Type",
            "drive",
            "Drivetrain Type",
            2,
            &[
                ("fwd", "Front-Wheel Drive (FWD)"),
                ("rwd", "Rear-Wheel Drive (RWD)"),
                ("awd", "All-Wheel Drive (AWD)"),
                ("4wd", "4-Wheel Drive (4WD)"),
                ("part_time_4wd", "Part-Time 4WD"),
            ],
        )
        .ai_fillable(),
        select(
            "transmission",
            "Transmission",
            "drive",
            "Transmission Type",
            3,
            &[
                ("automatic", "Automatic"),
                ("manual", "Manual"),
                ("cvt", "CVT (Continuously Variable)"),
                ("electric_motor", "Electric Motor"),
                ("hybrid", "Hybrid"),
                ("dual_clutch", "Dual-Clutch"),
                ("semi_automatic", "Semi-Automatic"),
            ],
        )
        .ai_fillable(),
        select(
            "fuel_type",
            "Fuel Type",
            "drive",
            "Primary Fuel Type",
            4,
            &[
                ("gasoline", "Gasoline"),
                ("diesel", "Diesel"),
                ("electric", "Electric"),
                ("hybrid", "Hybrid"),
                ("plug_in_hybrid", "Plug-in Hybrid"),
                ("ethanol", "Ethanol (E85)"),
                ("natural_gas", "Natural Gas (CNG)"),
                ("propane", "Propane (LPG)"),
                ("hydrogen", "Hydrogen Fuel Cell"),
            ],
        )
        .ai_fillable(),
        // Performance
        text("horsepower", "Horsepower", "performance", "Engine Horsepower", 1).ai_fillable(),
        text("torque", "Torque", "performance", "Engine Torque", 2).ai_fillable(),
        text("zero_to_sixty", "0-60 mph", "performance", "0-60 mph time", 3).ai_fillable(),
        text(
            "mpg_gas_equivalent",
            "MPG - Gas Equivalent",
            "performance",
            "Miles Per Gallon",
            4,
        )
        .ai_fillable(),
        text(
            "estimated_electric_range",
            "Estimated Electric Range",
            "performance",
            "Electric Range in Miles",
            5,
        )
        .ai_fillable(),
        // Measurements
        number(
            "seating_capacity",
            "Seating Capacity",
            "measurements",
            "Number of Seats",
            1,
            NumericBounds {
                min: 1.0,
                max: Some(20.0),
                step: 1.0,
            },
        )
        .ai_fillable(),
        number(
            "number_of_keys",
            "Number of Keys",
            "measurements",
            "Number of Keys Included",
            2,
            NumericBounds {
                min: 0.0,
                max: Some(10.0),
                step: 1.0,
            },
        ),
        text("cargo_space", "Cargo Space", "measurements", "Cargo Space (cubic feet)", 3)
            .ai_fillable(),
        // Features
        feature("cruise_control", "Cruise Control", "Cruise Control System", 1),
        feature("apple_carplay", "Apple CarPlay", "Apple CarPlay Support", 2),
        feature("android_auto", "Android Auto", "Android Auto Support", 3),
        feature("backup_camera", "Backup Camera", "Rear View Camera", 4),
        feature("heated_seats", "Heated Seats", "Heated Seating", 5),
        feature("sunroof", "Sunroof", "Sunroof/Moonroof", 6),
        feature("leather_seats", "Leather Seats", "Genuine Leather Seating", 7),
        feature("navigation_system", "Navigation System", "Built-in GPS Navigation", 8),
        // Photos
        FieldDefinition::new("car_photos", "Car Photos", TypeSettings::Textarea)
            .with_group("photos")
            .with_description("Car photo URLs (comma-separated)")
            .with_position(1),
        // Catch-all for the complete decode payload
        FieldDefinition::new(
            "extended_vehicle_details",
            "Extended Vehicle Details",
            TypeSettings::Textarea,
        )
        .with_group("specifications")
        .with_description("Complete decode data")
        .hidden(),
    ];
    fields.sort_by_key(|f| f.position);
    fields
}

/// The built-in decode mapping: external variable name to field key
#[must_use]
pub fn default_decode_mapping() -> BTreeMap<String, String> {
    [
        ("Make", "make"),
        ("Model", "model"),
        ("Model Year", "year"),
        ("Trim", "trim"),
        ("Body Class", "body_class"),
        ("Drive Type", "drive_type"),
        ("Engine Number of Cylinders", "engine_cylinders"),
        ("Displacement (L)", "displacement_l"),
        ("Fuel Type - Primary", "fuel_type"),
        ("Engine Configuration", "engine_configuration"),
        ("Engine Brake (hp) From", "horsepower"),
        ("Transmission Style", "transmission"),
        ("Number of Seats", "seating_capacity"),
    ]
    .into_iter()
    .map(|(variable, key)| (variable.to_string(), key.to_string()))
    .collect()
}

fn text(key: &str, label: &str, group: &str, description: &str, position: i64) -> FieldDefinition {
    FieldDefinition::new(key, label, TypeSettings::Text)
        .with_group(group)
        .with_description(description)
        .with_position(position)
}

fn number(
    key: &str,
    label: &str,
    group: &str,
    description: &str,
    position: i64,
    bounds: NumericBounds,
) -> FieldDefinition {
    FieldDefinition::new(key, label, TypeSettings::Number(bounds))
        .with_group(group)
        .with_description(description)
        .with_position(position)
}

fn currency(key: &str, label: &str, description: &str, position: i64) -> FieldDefinition {
    number(
        key,
        label,
        "pricing",
        description,
        position,
        NumericBounds {
            min: 0.0,
            max: None,
            step: 0.01,
        },
    )
}

fn select(
    key: &str,
    label: &str,
    group: &str,
    description: &str,
    position: i64,
    options: &[(&str, &str)],
) -> FieldDefinition {
    let options = options
        .iter()
        .map(|(value, label)| SelectOption::new(*value, *label))
        .collect();
    FieldDefinition::new(key, label, TypeSettings::Select { options })
        .with_group(group)
        .with_description(description)
        .with_position(position)
}

fn feature(key: &str, label: &str, description: &str, position: i64) -> FieldDefinition {
    FieldDefinition::new(key, label, TypeSettings::CheckboxArray { options: Vec::new() })
        .with_group("features")
        .with_description(description)
        .with_position(position)
}
