// tests/pipeline_tests.rs
//! End-to-end burst analysis on synthetic EMG recordings

use emg_burst::analysis::one_way_anova;
use emg_burst::config::AnalysisConfig;
use emg_burst::error::EmgError;
use emg_burst::io::parse_recording;
use emg_burst::processing::{extract_bursts, apply_window, BurstPipeline, SignalConditioner};
use emg_burst::report::AnalysisReport;
use emg_burst::signal::Signal;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FS: f64 = 2000.0;

/// Uniform noise whose amplitude alternates between `loud` and `quiet`
/// every `block` samples, starting loud
fn gated_noise(len: usize, block: usize, loud: f64, quiet: f64, seed: u64) -> Signal {
    let mut rng = StdRng::seed_from_u64(seed);
    let samples = (0..len)
        .map(|i| {
            let amplitude = if (i / block) % 2 == 0 { loud } else { quiet };
            amplitude * rng.gen_range(-1.0..1.0)
        })
        .collect();
    Signal::new(samples, FS).unwrap()
}

#[test]
fn test_every_full_block_becomes_a_burst() {
    let pipeline = BurstPipeline::new(&AnalysisConfig::default()).unwrap();
    let raw = gated_noise(4096 + 100, 512, 1.0, 0.05, 7);

    let output = pipeline.run(&raw).unwrap();

    assert_eq!(output.conditioned.len(), raw.len());
    assert_eq!(output.windowed.len(), 4096);
    assert_eq!(output.bursts.len(), 16);
    for (i, burst) in output.bursts.iter().enumerate() {
        // Hann endpoints are the only exact zeros
        assert_eq!(burst.len(), 254);
        assert_eq!(burst.start(), i * 256 + 1);
    }

    let anova = output.anova.unwrap();
    assert_eq!(anova.df_between, 15);
    assert_eq!(anova.df_within, 16 * 254 - 16);
    assert!((0.0..=1.0).contains(&anova.p_value));
}

#[test]
fn test_loud_bursts_have_larger_spread() {
    let pipeline = BurstPipeline::new(&AnalysisConfig::default()).unwrap();
    let raw = gated_noise(4096, 1024, 1.0, 0.01, 11);
    let output = pipeline.run_descriptive(&raw).unwrap();

    // Window blocks 0-3 are loud and 4-7 quiet; blocks 1 and 5 sit well
    // clear of the transitions
    let loud = output.statistics[1].std_dev;
    let quiet = output.statistics[5].std_dev;
    assert!(loud > 10.0 * quiet, "loud {} quiet {}", loud, quiet);
}

#[test]
fn test_stages_compose_by_hand() {
    let config = AnalysisConfig::default();
    let pipeline = BurstPipeline::new(&config).unwrap();
    let raw = gated_noise(2048, 256, 1.0, 0.1, 3);

    let conditioner = SignalConditioner::from_config(&config.conditioning, FS).unwrap();
    let conditioned = conditioner.condition(&raw).unwrap();
    let windowed = apply_window(&conditioned, config.window_size).unwrap();
    let bursts = extract_bursts(&windowed);

    let output = pipeline.run(&raw).unwrap();
    assert_eq!(output.conditioned, conditioned);
    assert_eq!(output.windowed, windowed);
    assert_eq!(output.bursts, bursts);

    let groups: Vec<&[f64]> = bursts.iter().map(|b| b.samples()).collect();
    assert_eq!(output.anova.unwrap(), one_way_anova(&groups).unwrap());
}

#[test]
fn test_pipeline_is_deterministic() {
    let pipeline = BurstPipeline::new(&AnalysisConfig::default()).unwrap();
    let raw = gated_noise(3000, 300, 1.0, 0.2, 42);

    let first = pipeline.run(&raw).unwrap();
    let second = pipeline.run(&raw).unwrap();
    assert_eq!(first.windowed, second.windowed);
    assert_eq!(first.statistics, second.statistics);
    assert_eq!(first.anova, second.anova);
}

#[test]
fn test_signal_shorter_than_window() {
    let pipeline = BurstPipeline::new(&AnalysisConfig::default()).unwrap();
    let raw = gated_noise(200, 64, 1.0, 0.1, 5);

    let output = pipeline.run_descriptive(&raw).unwrap();
    assert_eq!(output.conditioned.len(), 200);
    assert!(output.windowed.is_empty());
    assert!(output.bursts.is_empty());
    assert!(output.spectra.is_empty());

    let err = pipeline.run(&raw).unwrap_err();
    assert!(matches!(err, EmgError::InsufficientGroups { found: 0 }));
}

#[test]
fn test_spectra_match_bursts() {
    let pipeline = BurstPipeline::new(&AnalysisConfig::default()).unwrap();
    let raw = gated_noise(2048, 256, 1.0, 0.5, 9);
    let output = pipeline.run(&raw).unwrap();

    for (burst, spectrum) in output.bursts.iter().zip(output.spectra.iter()) {
        assert_eq!(spectrum.len(), (burst.len() / 2).max(1));
        assert_eq!(spectrum.frequencies_hz[0], 0.0);
        let peak = spectrum.peak_frequency().unwrap();
        assert!(peak > 0.0 && peak < FS / 2.0);
    }
}

#[test]
fn test_recording_to_report() {
    let raw = gated_noise(1024, 256, 1.0, 0.1, 21);
    let text: String = raw
        .samples()
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{},{}\n", i as f64 / FS, v))
        .collect();

    let recording = parse_recording(&format!("# time,voltage\n{}", text), FS).unwrap();
    assert_eq!(recording.signal.len(), 1024);

    let config = AnalysisConfig::default();
    let output = BurstPipeline::new(&config).unwrap().run(&recording.signal).unwrap();
    let report = AnalysisReport::from_output(&output, config.significance_level);

    assert_eq!(report.bursts.len(), 4);
    assert_eq!(report.bursts[3].number, 4);
    assert!(report.anova.is_some());
    assert!(report.to_string().contains("One-way ANOVA, F(3, 1012)"));
}
