mod temp_audio_spool;

pub use temp_audio_spool::TempAudioSpool;
