use indiebrew_core::ClassifierLists;
use indiebrew_ranker::Assembler;

/// One tab-separated line per name: verdict, rule, coffee hint, name.
pub(crate) fn run_classify(lists: &ClassifierLists, names: &[String]) -> Vec<String> {
    let assembler = Assembler::new(lists);
    names
        .iter()
        .map(|name| {
            let verdict = assembler.classifier().classify(name);
            let label = if verdict.is_chain() {
                "chain"
            } else {
                "independent"
            };
            let coffee_hint = assembler.relevance().looks_like_coffee_venue(name);
            format!(
                "{label}\t{}\tcoffee_hint={coffee_hint}\t{name}",
                verdict.reason()
            )
        })
        .collect()
}
