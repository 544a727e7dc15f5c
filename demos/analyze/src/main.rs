use argh::FromArgs;

use linvis::algebra::{Matrix, MatrixAnalysis};
use linvis::scene::{Scene, SceneConfig};

#[derive(FromArgs)]
/// Analyze a matrix and apply it to a set of vectors
struct Args {
    /// matrix rows separated by ';', entries by ',' (e.g. "1,2;3,4")
    #[argh(option, short = 'm')]
    matrix: String,

    /// vector components separated by ',' (repeatable)
    #[argh(option, short = 'v')]
    vector: Vec<String>,

    /// print the result as JSON
    #[argh(switch)]
    json: bool,

    /// do not compute the transformed vectors
    #[argh(switch)]
    hide_derived: bool,
}

fn parse_numbers(s: &str) -> Result<Vec<f64>, Box<dyn std::error::Error>> {
    s.split(',')
        .map(|x| x.trim().parse::<f64>().map_err(|e| format!("invalid number {x:?}: {e}").into()))
        .collect()
}

fn parse_matrix(s: &str) -> Result<Matrix, Box<dyn std::error::Error>> {
    let rows = s
        .split(';')
        .map(parse_numbers)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Matrix::from_rows(&rows)?)
}

fn fmt_opt<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

fn print_analysis(analysis: &MatrixAnalysis) {
    println!("dimension:        {}", analysis.dimension);
    println!("determinant:      {}", fmt_opt(analysis.determinant));
    println!("trace:            {}", fmt_opt(analysis.trace));
    println!("invertible:       {}", fmt_opt(analysis.invertible));
    println!("rank:             {}", analysis.rank);
    println!("singular values:  {:?}", analysis.singular_values);
    println!("condition number: {}", fmt_opt(analysis.condition_number));

    let kinds = analysis
        .kinds
        .iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>();
    println!("properties:       {}", kinds.join(", "));

    if let Some(inverse) = &analysis.inverse {
        println!("inverse:\n{inverse}");
    }

    match &analysis.eigen {
        Some(eigen) => {
            println!("eigen ({:?}):", eigen.kind());
            for pair in eigen.pairs() {
                println!("  {} -> {:?}", pair.eigenvalue, pair.eigenvector);
            }
        }
        None => println!("eigen:            N/A"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let matrix = parse_matrix(&args.matrix)?;
    let mut scene = Scene::new(SceneConfig {
        show_derived: !args.hide_derived,
        dimension: matrix.dimension(),
        ..Default::default()
    });
    scene.set_matrix(matrix);

    for v in &args.vector {
        let id = scene.add_source_vector(parse_numbers(v)?)?;
        log::debug!("added vector {id}");
    }

    let analysis = scene.analysis();

    if args.json {
        let out = serde_json::json!({
            "matrix": scene.matrix(),
            "analysis": analysis,
            "vectors": scene.source_vectors(),
            "derived": scene.derived_vectors(),
            "incompatible": scene.incompatible(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("matrix:\n{}", scene.matrix());
    print_analysis(&analysis);

    for source in scene.source_vectors() {
        match scene.derived_for(source.id()) {
            Some(derived) => println!(
                "{}: {:?} -> {:?}",
                source.label(),
                source.components(),
                derived.components()
            ),
            None if scene.show_derived() => {
                println!("{}: {:?} -> N/A", source.label(), source.components())
            }
            None => println!("{}: {:?}", source.label(), source.components()),
        }
    }

    for diagnostic in scene.incompatible() {
        log::warn!("{diagnostic}");
    }

    Ok(())
}
