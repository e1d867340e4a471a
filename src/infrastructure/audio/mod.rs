mod assembly_ai_engine;

pub use assembly_ai_engine::AssemblyAiEngine;
