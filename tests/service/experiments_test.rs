use fantasy_namegen::service::experiments::{
    experiment_configs, run_experiments, save_samples, SAMPLE_PROMPTS,
};
use fantasy_namegen::service::names::{is_affixed_name, NameGenerator};
use tempfile::tempdir;

#[test]
fn test_run_experiments_follows_configs() {
    let generator = NameGenerator::rule_based_only();
    let results = run_experiments(&generator);
    let configs = experiment_configs();

    assert_eq!(results.len(), 4);
    for (result, config) in results.iter().zip(configs.iter()) {
        assert_eq!(result.prompt, "Single elf name, no spaces: ");
        assert_eq!(result.seed, config.seed);
        assert_eq!(result.use_flare, config.use_flare);
        assert!((result.temperature - config.temperature).abs() < f64::EPSILON);
        assert!(is_affixed_name(&result.name), "unexpected name: {}", result.name);
    }
}

#[test]
fn test_save_samples_writes_three_files() {
    let dir = tempdir().unwrap();
    let outputs = dir.path().join("outputs");
    let generator = NameGenerator::rule_based_only();

    let written = save_samples(&generator, &outputs).unwrap();
    assert_eq!(written.len(), SAMPLE_PROMPTS.len());

    for i in 1..=3 {
        let path = outputs.join(format!("name{}.txt", i));
        assert!(written.contains(&path));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.ends_with('\n'));
        assert!(is_affixed_name(&content), "unexpected name: {}", content);
    }
}

#[test]
fn test_save_samples_overwrites_existing_files() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("name1.txt"), "stale\n").unwrap();

    save_samples(&NameGenerator::rule_based_only(), dir.path()).unwrap();

    let content = std::fs::read_to_string(dir.path().join("name1.txt")).unwrap();
    assert_ne!(content, "stale\n");
}
