use burn::{
    module::Param,
    nn::LinearRecord,
    tensor::{backend::Backend, Data, Shape, Tensor},
};
use candle_core::Tensor as CandleTensor;

/// Convert a PyTorch-layout classifier (weight: [n_classes, hidden_size]) into a Burn `Linear`
/// record, which stores the weight as [hidden_size, n_classes]
pub fn linear_from_candle<B: Backend>(
    weight: &CandleTensor,
    bias: &CandleTensor,
    n_classes: usize,
    device: &B::Device,
) -> anyhow::Result<LinearRecord<B>> {
    let [rows, cols] = match weight.dims() {
        &[rows, cols] => [rows, cols],
        dims => return Err(anyhow!("Classifier weight must be 2D, found {:?}", dims)),
    };

    if rows != n_classes {
        return Err(anyhow!(
            "Classifier has {} outputs but the configuration defines {} classes",
            rows,
            n_classes
        ));
    }

    if bias.dims() != [rows] {
        return Err(anyhow!(
            "Classifier bias shape {:?} does not match {} outputs",
            bias.dims(),
            rows
        ));
    }

    let weight_values = weight
        .flatten_all()
        .and_then(|t| t.to_vec1::<f32>())
        .map_err(|e| anyhow!("Unable to read classifier weight: {}", e))?;

    let bias_values = bias
        .to_vec1::<f32>()
        .map_err(|e| anyhow!("Unable to read classifier bias: {}", e))?;

    let weight =
        Tensor::<B, 2>::from_floats(Data::new(weight_values, Shape::new([rows, cols])), device)
            .transpose();

    let bias = Tensor::<B, 1>::from_floats(Data::new(bias_values, Shape::new([rows])), device);

    Ok(LinearRecord {
        weight: Param::from(weight),
        bias: Some(Param::from(bias)),
    })
}
