//! The `dualscore init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("dualscore.toml").exists() {
        println!("dualscore.toml already exists, skipping.");
    } else {
        std::fs::write("dualscore.toml", SAMPLE_CONFIG)?;
        println!("Created dualscore.toml");
    }

    if std::path::Path::new("applicants.csv").exists() {
        println!("applicants.csv already exists, skipping.");
    } else {
        std::fs::write("applicants.csv", SAMPLE_APPLICANTS)?;
        println!("Created applicants.csv");
    }

    println!("\nNext steps:");
    println!("  1. Edit dualscore.toml to tune weights, bonuses, and the cutoff");
    println!("  2. Run: dualscore validate --input applicants.csv");
    println!("  3. Run: dualscore run --input applicants.csv");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# dualscore configuration
#
# Environment overrides: DUALSCORE_MAX_TEST, DUALSCORE_LOW_INCOME, DUALSCORE_CUTOFF

max_gpa = 4.0
max_test = 1600        # 36 for ACT
low_income_threshold = 40000
cutoff = 0.82

# Blind model: merit features only
[weights]
gpa = 0.45
test = 0.30
extra = 0.10
essay = 0.10
rec = 0.05

# Aware model: added to the blind score; 0 neutralizes, negative penalizes
[bonuses]
low_income = 0.05
first_gen = 0.05
disability = 0.03
legacy = 0.02
local = 0.03
"#;

const SAMPLE_APPLICANTS: &str = "\
Name,Age,Geography,Ethnicity,Income,Legacy,Local,GPA,Test,Extra,Essay,Rec,FirstGen,Disability
Alice Chen,18,Urban,Asian,\"$32,000\",No,Yes,3.8,1450,0.8,0.9,0.7,Yes,No
Ben Ortiz,17,Rural,Hispanic,\"$28,500\",No,No,3.4,1280,0.6,0.7,0.8,Yes,No
Chloe Martin,18,Suburban,White,\"$145,000\",Yes,No,3.9,1520,0.9,0.8,0.9,No,No
Dev Patel,19,Urban,Asian,\"$76,000\",No,Yes,3.6,1390,0.7,0.6,0.6,No,Yes
Ella Brooks,18,Rural,Black,\"$39,000\",No,Yes,3.5,1330,0.8,0.8,0.7,Yes,No
Farah Aziz,17,Urban,Middle Eastern,\"$210,000\",Yes,Yes,4.0,1580,1.0,0.9,1.0,No,No
";
