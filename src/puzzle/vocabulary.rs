//! Builtin sustainability vocabulary

use super::VocabEntry;

/// Word list used by both puzzle kinds
pub const ECO_WORDS: &[(&str, &str)] = &[
    ("CLIMATE", "Long-term weather pattern of a region."),
    ("RECYCLE", "Turning waste into reusable material."),
    ("ECOSYSTEM", "Living things interacting with their environment."),
    ("BIODIVERSITY", "Variety of plant and animal life."),
    ("POLLUTION", "Harmful substances released into nature."),
    ("CONSERVE", "Protect and save resources."),
    ("HABITAT", "Natural home of an animal or plant."),
    ("RENEWABLE", "A resource that can be naturally replaced."),
    ("ORGANIC", "Food grown without chemicals."),
    ("COMPOST", "Natural fertilizer from decomposed waste."),
    ("SUSTAINABLE", "Using resources responsibly for the future."),
    ("GREENHOUSE", "A structure that traps heat; also heat-trapping gases."),
    ("DEFORESTATION", "Cutting down forests."),
    ("EMISSION", "Release of gas or pollution into the air."),
    ("CARBON", "Element found in fuels and greenhouse gases."),
    ("OXYGEN", "Gas essential for breathing."),
    ("NATURE", "The natural world: plants, animals, land, water."),
    ("WILDLIFE", "Animals living freely in nature."),
    ("EARTHQUAKE", "Shaking of Earth surface."),
    ("WETLANDS", "Land areas covered by water, rich in life."),
    ("SOLAR", "Energy from the sun."),
    ("WINDMILL", "Machine that creates energy using wind."),
    ("GLACIERS", "Large moving masses of ice."),
    ("PURIFY", "Remove impurities to make clean."),
    ("ATMOSPHERE", "The layer of gases surrounding Earth."),
    ("HYDRATION", "Supplying water to living things."),
    ("CLIMATE-ACTION", "Steps taken to fight climate change."),
    ("REFORESTATION", "Planting trees in deforested areas."),
    ("AFFORESTATION", "Growing forests in new areas."),
    ("SUSTAINABILITY", "Protecting nature while meeting human needs."),
    ("CONSERVATION", "Saving and protecting natural resources."),
    ("FOSSIL-FUELS", "Coal, oil, gas formed from ancient remains."),
    ("RENEWABLE-ENERGY", "Energy sources that do not run out."),
    ("NON-RENEWABLE", "Resources that cannot be replaced quickly."),
    ("BIODEGRADABLE", "Can break down naturally."),
    ("COMPOSTABLE", "Can break down into natural fertilizer."),
    ("ECO-FRIENDLY", "Not harmful to the environment."),
    ("SUSTAINABILITY-GOALS", "Targets to protect the planet."),
    ("CLIMATE-CRISIS", "Extreme climate emergency."),
    ("MELTING", "Ice turning into water due to heat."),
    ("RECYCLING-BIN", "Container for recyclable waste."),
    ("GREEN-ENERGY", "Clean and non-polluting energy."),
    ("WATER-SCARCITY", "Not enough clean water available."),
    ("AIR-QUALITY", "How clean or polluted the air is."),
    ("ZERO-WASTE", "Using resources without creating waste."),
    ("UPCYCLE", "Convert waste into a better new product."),
    ("CARBON-FOOTPRINT", "Total greenhouse gases a person releases."),
    ("EARTH-DAY", "Global day dedicated to environmental protection."),
    ("WILDLIFE-PROTECTION", "Saving animals and their habitats."),
    ("OVERFISHING", "Catching too many fish from oceans."),
    ("MARINE-LIFE", "Plants and animals living in oceans."),
    ("CORAL-REEF", "Underwater structures made by corals."),
    ("OZONE-LAYER", "Atmosphere layer that protects from UV rays."),
    ("UV-RADIATION", "Harmful rays from the sun."),
    ("GREEN-REVOLUTION", "Increase in farming using modern methods."),
    ("AGRI-WASTE", "Waste produced from agriculture."),
    ("BIOGAS", "Gas produced from organic waste."),
    ("RAINWATER-HARVESTING", "Collecting and storing rainwater."),
    ("GROUNDWATER", "Water stored under Earth surface."),
    ("OVERCONSUMPTION", "Using too many resources."),
    ("DROUGHT", "Long period with no rain."),
    ("FLOOD", "Overflow of water on land."),
    ("CYCLONE", "Strong, rotating storm."),
    ("EROSION", "Wearing away of land by wind or water."),
    ("PLANTATION", "Large area of planted trees or crops."),
    ("EARTH-RESOURCES", "Natural materials like water, soil, minerals."),
    ("WILDLIFE-SANCTUARY", "Protected area for animals."),
    ("NATIONAL-PARK", "Reserved natural area protected by government."),
    ("ORGANIC-FARMING", "Farming without chemical pesticides."),
    ("FERTILITY", "Ability of soil to support plant growth."),
    ("OXYGEN-CYCLE", "Process of oxygen moving through Earth."),
    ("WATER-CYCLE", "Natural movement of water on Earth."),
    ("CARBON-CYCLE", "Circulation of carbon through nature."),
    ("FOSSILIZATION", "Process of forming fossils."),
    ("MICROPLASTICS", "Tiny pieces of plastic harmful to life."),
    ("LANDFILL", "Area where waste is buried."),
    ("WASTE-SEGREGATION", "Separating waste into categories."),
    ("ECOTOURISM", "Responsible travel to natural places."),
    ("SUSTAINABLE-LIVING", "Lifestyle with minimal environmental impact."),
    ("NATURAL-RESOURCES", "Water, wood, minerals, soil."),
    ("WIND-ENERGY", "Energy from moving air."),
    ("SOLAR-PANEL", "Device that converts sunlight to electricity."),
    ("CARBON-NEUTRAL", "Not increasing carbon emissions."),
    ("PLASTIC-BAN", "Restriction on using plastic products."),
    ("ECO-SYSTEM-BALANCE", "When all living things live in harmony."),
    ("EARTH-PROTECTION", "Actions taken to save our planet."),
    ("WILDLIFE-EXTINCTION", "Species dying out completely."),
    ("GREEN-FUTURE", "A world with clean and safe environment."),
    ("SOIL-POLLUTION", "Harmful chemicals entering soil."),
    ("WATER-POLLUTION", "Harmful substances in water."),
    ("AIR-POLLUTION", "Contamination of air with harmful gases."),
    ("CONTAMINATION", "Making something dirty or unsafe."),
    ("SUSTAINABLE-TECH", "Technology that reduces environmental impact."),
    ("ECO-EDUCATION", "Learning about protecting nature."),
    ("NATURE-CARE", "Activities that support environment."),
    ("ECO-WARRIOR", "A person who fights for the environment."),
    ("CLEAN-ENERGY", "Energy that does not pollute."),
    ("MARINE-POLLUTION", "Pollution that harms oceans and sea life."),
    ("WILDLIFE-HABITATS", "Natural places where animals live."),
    ("GLOBAL-WARMING", "Increase in Earth temperature due to pollution."),
];

/// Owned copy of the builtin list
pub fn builtin() -> Vec<VocabEntry> {
    ECO_WORDS
        .iter()
        .map(|&(word, meaning)| VocabEntry::new(word, meaning))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_size_and_shape() {
        assert!(ECO_WORDS.len() >= 100);
        for (word, meaning) in ECO_WORDS {
            assert!(!word.is_empty() && !meaning.is_empty());
            assert_eq!(*word, word.to_uppercase(), "{word} should be uppercase");
            assert!(word.chars().any(|c| c.is_alphabetic()));
        }
    }
}
